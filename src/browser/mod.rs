use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod snapshot;
pub mod webdriver;

#[cfg(test)]
pub mod testing;

pub use snapshot::SnapshotBrowser;
pub use webdriver::WebDriverSession;

/// Failures reported by a [`Browser`] implementation.
#[derive(Debug, Clone, Error)]
pub enum BrowserError {
    /// No element matched the selector.
    #[error("no element matches `{0}`")]
    NotFound(String),
    /// Opening a page failed.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    /// Any other command the browser rejected.
    #[error("browser command failed: {0}")]
    Command(String),
    /// The session (or its driver) is gone; nothing else can succeed.
    #[error("browser session lost: {0}")]
    SessionLost(String),
}

impl BrowserError {
    /// Whether the whole run has to stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BrowserError::SessionLost(_))
    }
}

/// Page navigation and element queries against a live or recorded page.
///
/// All element lookups take CSS selectors and operate on the page shown in
/// the current tab. Implementations report a missing element as
/// [`BrowserError::NotFound`] and never retry on their own.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Send + Sync;

    /// Loads `url` in the current tab.
    async fn goto(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Opens `url` in a new tab and makes it current.
    async fn open_tab(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Closes the current tab and returns to the main one.
    async fn close_tab(&mut self) -> Result<(), BrowserError>;

    async fn find(&self, css: &str) -> Result<Self::Element, BrowserError>;

    async fn find_all(&self, css: &str) -> Result<Vec<Self::Element>, BrowserError>;

    async fn find_in(
        &self,
        parent: &Self::Element,
        css: &str,
    ) -> Result<Self::Element, BrowserError>;

    async fn find_all_in(
        &self,
        parent: &Self::Element,
        css: &str,
    ) -> Result<Vec<Self::Element>, BrowserError>;

    /// Rendered text of the element.
    async fn text(&self, element: &Self::Element) -> Result<String, BrowserError>;

    /// Value of a named attribute, `None` when the element lacks it.
    async fn attr(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, BrowserError>;

    async fn click(&self, element: &Self::Element) -> Result<(), BrowserError>;

    /// Waits up to `timeout` for an element matching `css` to appear.
    async fn wait_for(
        &self,
        css: &str,
        timeout: Duration,
    ) -> Result<Self::Element, BrowserError>;
}
