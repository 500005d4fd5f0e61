//! Data models for catalog records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One comic extracted from a detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicRecord {
    /// Title as shown on the detail page
    pub name: String,
    /// Author(s), verbatim from the attribute table
    pub author: String,
    /// Publishing label
    pub publisher: String,
    /// ISBN, verbatim (the site mixes 10- and 13-digit forms)
    pub isbn: String,
    /// Price text including the currency symbol
    pub price: String,
    /// Release date, None when the site's date was absent or malformed
    pub release_date: Option<NaiveDate>,
    /// Edition format (cartoné, grapa, ...), empty when not listed
    pub format: String,
    /// Page count text, empty when not listed
    pub page_count: String,
    /// Stock status
    pub availability: Availability,
}

/// Stock status of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    #[default]
    OutOfStock,
}

impl Availability {
    /// Maps the site's stock label. Anything but the exact label
    /// "En stock" counts as sold out, matching the storefront's own
    /// rendering of every non-available state.
    pub fn from_label(label: &str) -> Self {
        if label.trim() == "En stock" {
            Availability::InStock
        } else {
            Availability::OutOfStock
        }
    }

    /// The Spanish label used in the CSV output.
    pub fn as_spanish(&self) -> &'static str {
        match self {
            Availability::InStock => "En stock",
            Availability::OutOfStock => "Agotado",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_spanish())
    }
}
