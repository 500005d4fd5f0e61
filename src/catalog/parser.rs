//! HTML parser for listing and detail pages.

use crate::catalog::dates::parse_release_date;
use crate::catalog::models::{Availability, ComicRecord};
use crate::catalog::selectors::{detail, listing};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// A detail page lacking one of the identity fields cannot produce a
/// usable record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Parser for storefront HTML pages.
pub struct CatalogParser {
    base_url: String,
}

impl CatalogParser {
    /// Creates a parser that resolves relative links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Extracts detail-page URLs from a rendered listing page, in DOM
    /// order. Items without a title link are logged and skipped.
    pub fn parse_listing(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let mut urls = Vec::new();
        for item in document.select(&listing::ITEM) {
            let href = item.select(&listing::TITLE_LINK).next().and_then(|a| a.value().attr("href"));

            match href {
                Some(href) if !href.is_empty() => {
                    let url = self.resolve(href);
                    trace!("Found item link: {}", url);
                    urls.push(url);
                }
                _ => warn!("Catalog item without a title link, skipping"),
            }
        }

        debug!("Parsed {} item links from listing page", urls.len());
        urls
    }

    /// Builds one record from a rendered detail page.
    ///
    /// Identity fields must be present; format and page count degrade to
    /// empty strings; availability defaults to sold out; a missing or
    /// malformed date becomes `None`.
    pub fn parse_detail(&self, html: &str) -> Result<ComicRecord, ParseError> {
        let document = Html::parse_document(html);

        let name = required_text(&document, &detail::NAME, "Nombre")?;
        let price = required_text(&document, &detail::PRICE, "Precio")?;
        let author = required_text(&document, &detail::AUTHOR, "Autor")?;
        let publisher = required_text(&document, &detail::PUBLISHER, "Editorial")?;
        let isbn = required_text(&document, &detail::ISBN, "ISBN")?;

        let release_date =
            optional_text(&document, &detail::RELEASE_DATE).and_then(|t| parse_release_date(&t));

        let format = optional_text(&document, &detail::FORMAT).unwrap_or_default();
        let page_count = optional_text(&document, &detail::PAGE_COUNT).unwrap_or_default();

        let availability = optional_text(&document, &detail::AVAILABILITY)
            .map(|t| Availability::from_label(&t))
            .unwrap_or_default();

        trace!("Parsed detail page for: {}", name);

        Ok(ComicRecord {
            name,
            author,
            publisher,
            isbn,
            price,
            release_date,
            format,
            page_count,
            availability,
        })
    }

    fn resolve(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), href)
        }
    }
}

fn required_text(
    document: &Html,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ParseError> {
    optional_text(document, selector).ok_or(ParseError::MissingField(field))
}

fn optional_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(|e| e.text().collect::<String>().trim().to_string())
}
