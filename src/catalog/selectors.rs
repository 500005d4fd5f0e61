//! CSS selectors for the Norma Comics storefront (Magento).
//!
//! All selectors used for parsing live here. Update this file when the
//! storefront changes its HTML structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for paginated listing pages.
pub mod listing {
    use super::*;

    /// Catalog item container. Also the render marker for listing pages.
    pub static ITEM: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.item.product.product-item").unwrap());

    /// Title link carrying the detail-page URL.
    pub static TITLE_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.product-item-link").unwrap());

    /// CSS string the renderer waits on before capturing markup.
    pub static MARKER: &str = "li.item.product.product-item";
}

/// Selectors for item detail pages.
pub mod detail {
    use super::*;

    /// Item title.
    pub static NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.base").unwrap());

    /// Price including currency symbol.
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.price").unwrap());

    /// First cell of the attribute table, which the storefront always
    /// fills with the author line.
    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td.col.data").unwrap());

    /// Publisher cell.
    pub static PUBLISHER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td[data-th='Editorial']").unwrap());

    /// ISBN cell.
    pub static ISBN: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td[data-th='ISBN']").unwrap());

    /// Release date cell, Spanish-formatted ("15 ene 2023").
    pub static RELEASE_DATE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td[data-th='Fecha de venta']").unwrap());

    /// Edition format cell. Absent on some items.
    pub static FORMAT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td[data-th='Formato']").unwrap());

    /// Page count cell. Absent on some items.
    pub static PAGE_COUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td[data-th='Num páginas']").unwrap());

    /// Stock label: the span following the availability caption.
    pub static AVAILABILITY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.label-availability + span").unwrap());

    /// CSS string the renderer waits on before capturing markup.
    pub static MARKER: &str = "td.col.data";
}
