//! The scrape pipeline: listing pages -> detail pages -> CSV.

use crate::catalog::selectors::{detail, listing};
use crate::catalog::{CatalogParser, ComicRecord};
use crate::config::Config;
use crate::export::CsvExporter;
use crate::renderer::Renderer;
use anyhow::Result;
use std::fmt;
use tracing::{debug, info, warn};

/// Counters reported at the end of a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Listing pages successfully rendered and parsed
    pub pages_fetched: usize,
    /// Listing pages that failed to render
    pub pages_skipped: usize,
    /// Detail URLs discovered across all listing pages
    pub items_discovered: usize,
    /// Records written to the CSV
    pub records_written: usize,
    /// Detail pages skipped on render or parse failure
    pub items_skipped: usize,
}

impl fmt::Display for ScrapeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} listing pages fetched ({} skipped), {} items discovered, \
             {} records written ({} skipped)",
            self.pages_fetched,
            self.pages_skipped,
            self.items_discovered,
            self.records_written,
            self.items_skipped
        )
    }
}

/// Executes the full catalog scrape.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline with the given renderer.
    ///
    /// A page that fails to render or a detail page missing a required
    /// field is logged and skipped; the run itself only fails when the
    /// final CSV write does. Records accumulate in memory and are
    /// written once at the end.
    pub async fn execute(&self, renderer: &impl Renderer) -> Result<ScrapeSummary> {
        let parser = CatalogParser::new(self.config.base_url.clone());
        let mut summary = ScrapeSummary::default();

        // Phase 1: traverse the paginated listing, collecting detail URLs
        let mut detail_urls: Vec<String> = Vec::new();
        for url in self.config.listing_urls() {
            debug!("Fetching listing page: {}", url);
            match renderer.render(&url, listing::MARKER).await {
                Ok(html) => {
                    summary.pages_fetched += 1;
                    detail_urls.extend(parser.parse_listing(&html));
                }
                Err(e) => {
                    warn!("Skipping listing page {}: {:#}", url, e);
                    summary.pages_skipped += 1;
                }
            }
        }

        summary.items_discovered = detail_urls.len();
        info!(
            "Discovered {} items across {} listing pages",
            summary.items_discovered, summary.pages_fetched
        );

        // Phase 2: fetch each detail page and extract its record
        let mut records: Vec<ComicRecord> = Vec::new();
        for url in &detail_urls {
            let html = match renderer.render(url, detail::MARKER).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Skipping item {}: {:#}", url, e);
                    summary.items_skipped += 1;
                    continue;
                }
            };

            match parser.parse_detail(&html) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping item {}: {}", url, e);
                    summary.items_skipped += 1;
                }
            }
        }

        summary.records_written = records.len();

        // Phase 3: single write at the very end
        CsvExporter::new(&self.config.output).export(&records)?;

        info!("Scrape finished: {}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// Mock renderer serving canned HTML keyed by URL.
    struct MockRenderer {
        pages: HashMap<String, String>,
    }

    impl MockRenderer {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages.iter().map(|(u, h)| (u.to_string(), h.to_string())).collect(),
            }
        }
    }

    #[async_trait]
    impl Renderer for MockRenderer {
        async fn render(&self, url: &str, _marker: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("navigation to {url} failed"))
        }
    }

    fn make_test_config(output: std::path::PathBuf, pages: u32) -> Config {
        Config {
            base_url: "https://shop.test".to_string(),
            category_path: "/marvel.html".to_string(),
            first_page: 1,
            last_page: pages,
            page_size: 72,
            output,
            ..Config::default()
        }
    }

    fn listing_page(hrefs: &[&str]) -> String {
        let mut html = String::from("<html><body><ol>");
        for href in hrefs {
            html.push_str(&format!(
                r#"<li class="item product product-item">
                    <a class="product-item-link" href="{}">Item</a>
                </li>"#,
                href
            ));
        }
        html.push_str("</ol></body></html>");
        html
    }

    fn detail_page(name: &str, date: &str, stock: &str) -> String {
        format!(
            r#"<html><body>
                <span class="base">{name}</span>
                <span class="price">10,00 €</span>
                <div>
                    <span class="label-availability">Disponibilidad:</span>
                    <span>{stock}</span>
                </div>
                <table>
                    <tr><td class="col data" data-th="Autor">Autor</td></tr>
                    <tr><td class="col data" data-th="Editorial">Marvel</td></tr>
                    <tr><td class="col data" data-th="ISBN">978</td></tr>
                    <tr><td class="col data" data-th="Fecha de venta">{date}</td></tr>
                </table>
            </body></html>"#
        )
    }

    #[tokio::test]
    async fn test_scrape_two_pages() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let renderer = MockRenderer::new(&[
            (
                "https://shop.test/marvel.html?p=1&product_list_limit=72",
                &listing_page(&["/a.html", "/b.html"]),
            ),
            (
                "https://shop.test/marvel.html?p=2&product_list_limit=72",
                &listing_page(&["/c.html"]),
            ),
            ("https://shop.test/a.html", &detail_page("A", "15 ene 2023", "En stock")),
            ("https://shop.test/b.html", &detail_page("B", "??", "Agotado")),
            ("https://shop.test/c.html", &detail_page("C", "1 dic 2020", "En stock")),
        ]);

        let cmd = ScrapeCommand::new(make_test_config(output.clone(), 2));
        let summary = cmd.execute(&renderer).await.unwrap();

        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.pages_skipped, 0);
        assert_eq!(summary.items_discovered, 3);
        assert_eq!(summary.records_written, 3);
        assert_eq!(summary.items_skipped, 0);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert!(content.contains("15/01/2023"));
        assert!(content.contains("Agotado"));
    }

    #[tokio::test]
    async fn test_scrape_skips_failing_listing_page() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.csv");

        // Page 2 is not served by the mock and fails to render
        let renderer = MockRenderer::new(&[
            (
                "https://shop.test/marvel.html?p=1&product_list_limit=72",
                &listing_page(&["/a.html"]),
            ),
            ("https://shop.test/a.html", &detail_page("A", "15 ene 2023", "En stock")),
        ]);

        let cmd = ScrapeCommand::new(make_test_config(output.clone(), 2));
        let summary = cmd.execute(&renderer).await.unwrap();

        assert_eq!(summary.pages_fetched, 1);
        assert_eq!(summary.pages_skipped, 1);
        assert_eq!(summary.records_written, 1);
    }

    #[tokio::test]
    async fn test_scrape_skips_bad_detail_pages() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let renderer = MockRenderer::new(&[
            (
                "https://shop.test/marvel.html?p=1&product_list_limit=72",
                &listing_page(&["/ok.html", "/no-price.html", "/gone.html"]),
            ),
            ("https://shop.test/ok.html", &detail_page("Ok", "3 mar 2021", "En stock")),
            // Missing price: required field, record is dropped
            (
                "https://shop.test/no-price.html",
                r#"<html><body><span class="base">Broken</span></body></html>"#,
            ),
            // /gone.html is not served at all: render failure
        ]);

        let cmd = ScrapeCommand::new(make_test_config(output.clone(), 1));
        let summary = cmd.execute(&renderer).await.unwrap();

        assert_eq!(summary.items_discovered, 3);
        assert_eq!(summary.records_written, 1);
        assert_eq!(summary.items_skipped, 2);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Ok"));
    }

    #[tokio::test]
    async fn test_scrape_empty_catalog_writes_header_only() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let renderer = MockRenderer::new(&[(
            "https://shop.test/marvel.html?p=1&product_list_limit=72",
            "<html><body></body></html>",
        )]);

        let cmd = ScrapeCommand::new(make_test_config(output.clone(), 1));
        let summary = cmd.execute(&renderer).await.unwrap();

        assert_eq!(summary.items_discovered, 0);
        assert_eq!(summary.records_written, 0);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("Nombre,"));
    }

    #[test]
    fn test_summary_display() {
        let summary = ScrapeSummary {
            pages_fetched: 22,
            pages_skipped: 0,
            items_discovered: 1571,
            records_written: 1560,
            items_skipped: 11,
        };
        let text = summary.to_string();
        assert!(text.contains("22 listing pages"));
        assert!(text.contains("1571 items"));
        assert!(text.contains("1560 records"));
        assert!(text.contains("11 skipped"));
    }
}
