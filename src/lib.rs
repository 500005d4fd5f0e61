//! norma-crawler - Norma Comics Marvel catalog scraper
//!
//! Renders the storefront's paginated catalog in headless Chromium,
//! follows each item's detail page, and writes the extracted
//! attributes to a CSV file.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod export;
pub mod renderer;

pub use catalog::{Availability, CatalogParser, ComicRecord};
pub use config::Config;
pub use renderer::{ChromeRenderer, Renderer};
