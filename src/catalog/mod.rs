//! Storefront-specific modules: selectors, parsing, and data models.

pub mod dates;
pub mod models;
pub mod parser;
pub mod selectors;

pub use models::{Availability, ComicRecord};
pub use parser::{CatalogParser, ParseError};
