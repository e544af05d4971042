use super::{Browser, BrowserError};
use crate::text::normalize_ws;
use async_trait::async_trait;
use color_eyre::eyre::WrapErr;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use url::Url;

/// A browser over recorded HTML pages, keyed by URL.
///
/// Pages are parsed on every query, so no parsed document outlives a call.
/// Elements are addressed by their position in document order, which is
/// stable because a page's source never changes. Clicking does nothing:
/// modal content is already part of a saved page.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBrowser {
    pages: HashMap<String, String>,
    tabs: Vec<String>,
}

/// Handle to an element of the current snapshot page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotElement(usize);

impl SnapshotBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the HTML served for `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Loads a directory holding a `pages.json` manifest of `{ "url": "file.html" }`.
    pub fn from_dir(dir: &Path) -> color_eyre::Result<Self> {
        let manifest_path = dir.join("pages.json");
        let manifest = std::fs::read_to_string(&manifest_path)
            .wrap_err_with(|| format!("failed to read {}", manifest_path.display()))?;
        let manifest: HashMap<String, String> = serde_json::from_str(&manifest)
            .wrap_err_with(|| format!("invalid manifest {}", manifest_path.display()))?;

        let mut browser = Self::new();
        for (url, file) in manifest {
            let html = std::fs::read_to_string(dir.join(&file))
                .wrap_err_with(|| format!("failed to read snapshot {file}"))?;
            browser.pages.insert(url, html);
        }
        info!("Loaded {} snapshot pages from {}", browser.pages.len(), dir.display());
        Ok(browser)
    }

    fn load(&self, url: &str) -> Result<String, BrowserError> {
        if self.pages.contains_key(url) {
            Ok(url.to_string())
        } else {
            Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: "no snapshot recorded for this url".into(),
            })
        }
    }

    fn current(&self) -> Result<(&str, Html), BrowserError> {
        let url = self
            .tabs
            .last()
            .ok_or_else(|| BrowserError::Command("no page loaded".into()))?;
        let source = self
            .pages
            .get(url)
            .ok_or_else(|| BrowserError::Command(format!("page {url} vanished")))?;
        Ok((url, Html::parse_document(source)))
    }
}

fn selector(css: &str) -> Result<Selector, BrowserError> {
    Selector::parse(css).map_err(|e| BrowserError::Command(format!("invalid selector `{css}`: {e}")))
}

fn elements(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect()
}

fn handle_of(all: &[ElementRef<'_>], element: ElementRef<'_>) -> SnapshotElement {
    let index = all
        .iter()
        .position(|e| e.id() == element.id())
        .unwrap_or_default();
    SnapshotElement(index)
}

fn resolve<'a>(
    all: &[ElementRef<'a>],
    handle: &SnapshotElement,
) -> Result<ElementRef<'a>, BrowserError> {
    all.get(handle.0)
        .copied()
        .ok_or_else(|| BrowserError::Command("stale element handle".into()))
}

impl SnapshotBrowser {
    fn query(
        &self,
        scope: Option<&SnapshotElement>,
        css: &str,
    ) -> Result<Vec<SnapshotElement>, BrowserError> {
        let sel = selector(css)?;
        let (_, doc) = self.current()?;
        let all = elements(&doc);
        let found: Vec<SnapshotElement> = match scope {
            Some(parent) => resolve(&all, parent)?
                .select(&sel)
                .map(|e| handle_of(&all, e))
                .collect(),
            None => doc.select(&sel).map(|e| handle_of(&all, e)).collect(),
        };
        Ok(found)
    }

    fn first(
        &self,
        scope: Option<&SnapshotElement>,
        css: &str,
    ) -> Result<SnapshotElement, BrowserError> {
        self.query(scope, css)?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::NotFound(css.to_string()))
    }

    fn read_text(&self, handle: &SnapshotElement) -> Result<String, BrowserError> {
        let (_, doc) = self.current()?;
        let all = elements(&doc);
        let element = resolve(&all, handle)?;
        Ok(normalize_ws(&element.text().collect::<Vec<_>>().join(" ")))
    }

    fn read_attr(&self, handle: &SnapshotElement, name: &str) -> Result<Option<String>, BrowserError> {
        let (url, doc) = self.current()?;
        let all = elements(&doc);
        let element = resolve(&all, handle)?;
        let Some(value) = element.value().attr(name) else {
            return Ok(None);
        };
        if (name == "href" || name == "src") && !value.trim().is_empty() {
            if let Ok(base) = Url::parse(url) {
                if let Ok(absolute) = base.join(value) {
                    return Ok(Some(absolute.to_string()));
                }
            }
        }
        Ok(Some(value.to_string()))
    }
}

#[async_trait]
impl Browser for SnapshotBrowser {
    type Element = SnapshotElement;

    async fn goto(&mut self, url: &str) -> Result<(), BrowserError> {
        let url = self.load(url)?;
        match self.tabs.last_mut() {
            Some(current) => *current = url,
            None => self.tabs.push(url),
        }
        Ok(())
    }

    async fn open_tab(&mut self, url: &str) -> Result<(), BrowserError> {
        let url = self.load(url)?;
        self.tabs.push(url);
        Ok(())
    }

    async fn close_tab(&mut self) -> Result<(), BrowserError> {
        if self.tabs.len() < 2 {
            return Err(BrowserError::Command("cannot close the main tab".into()));
        }
        self.tabs.pop();
        Ok(())
    }

    async fn find(&self, css: &str) -> Result<SnapshotElement, BrowserError> {
        self.first(None, css)
    }

    async fn find_all(&self, css: &str) -> Result<Vec<SnapshotElement>, BrowserError> {
        self.query(None, css)
    }

    async fn find_in(
        &self,
        parent: &SnapshotElement,
        css: &str,
    ) -> Result<SnapshotElement, BrowserError> {
        self.first(Some(parent), css)
    }

    async fn find_all_in(
        &self,
        parent: &SnapshotElement,
        css: &str,
    ) -> Result<Vec<SnapshotElement>, BrowserError> {
        self.query(Some(parent), css)
    }

    async fn text(&self, element: &SnapshotElement) -> Result<String, BrowserError> {
        self.read_text(element)
    }

    async fn attr(
        &self,
        element: &SnapshotElement,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        self.read_attr(element, name)
    }

    async fn click(&self, _element: &SnapshotElement) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn wait_for(
        &self,
        css: &str,
        _timeout: Duration,
    ) -> Result<SnapshotElement, BrowserError> {
        self.first(None, css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <div class="card"><a class="go" href="/lote/1">Um</a></div>
            <div class="card"><a class="go" href="https://other.test/2">Dois</a></div>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_scoped_queries_and_resolved_links() {
        let mut browser = SnapshotBrowser::new().with_page("https://site.test/lista", PAGE);
        browser.goto("https://site.test/lista").await.unwrap();

        let cards = browser.find_all("div.card").await.unwrap();
        assert_eq!(cards.len(), 2);

        let first = browser.find_in(&cards[0], "a.go").await.unwrap();
        assert_eq!(browser.text(&first).await.unwrap(), "Um");
        assert_eq!(
            browser.attr(&first, "href").await.unwrap().as_deref(),
            Some("https://site.test/lote/1")
        );

        let second = browser.find_in(&cards[1], "a.go").await.unwrap();
        assert_eq!(
            browser.attr(&second, "href").await.unwrap().as_deref(),
            Some("https://other.test/2")
        );
        assert_eq!(browser.attr(&second, "title").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_element_and_unknown_page() {
        let mut browser = SnapshotBrowser::new().with_page("https://site.test/lista", PAGE);
        assert!(matches!(
            browser.goto("https://site.test/nada").await,
            Err(BrowserError::Navigation { .. })
        ));
        browser.goto("https://site.test/lista").await.unwrap();
        assert!(matches!(
            browser.find("h1").await,
            Err(BrowserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_tabs_return_to_main_page() {
        let mut browser = SnapshotBrowser::new()
            .with_page("https://site.test/lista", PAGE)
            .with_page("https://site.test/lote/1", "<html><body><h1>Lote</h1></body></html>");
        browser.goto("https://site.test/lista").await.unwrap();
        browser.open_tab("https://site.test/lote/1").await.unwrap();
        assert!(browser.find("h1").await.is_ok());
        browser.close_tab().await.unwrap();
        assert!(browser.find("h1").await.is_err());
        assert!(browser.close_tab().await.is_err());
    }
}
