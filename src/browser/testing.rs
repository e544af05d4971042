use super::{Browser, BrowserError};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Wraps a browser and records every selector it is asked to look up.
pub struct CountingBrowser<B> {
    pub inner: B,
    queries: Mutex<Vec<String>>,
}

impl<B> CountingBrowser<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn count(&self, css: &str) -> usize {
        self.queries.lock().unwrap().iter().filter(|q| *q == css).count()
    }

    fn record(&self, css: &str) {
        self.queries.lock().unwrap().push(css.to_string());
    }
}

#[async_trait]
impl<B: Browser> Browser for CountingBrowser<B> {
    type Element = B::Element;

    async fn goto(&mut self, url: &str) -> Result<(), BrowserError> {
        self.inner.goto(url).await
    }

    async fn open_tab(&mut self, url: &str) -> Result<(), BrowserError> {
        self.inner.open_tab(url).await
    }

    async fn close_tab(&mut self) -> Result<(), BrowserError> {
        self.inner.close_tab().await
    }

    async fn find(&self, css: &str) -> Result<Self::Element, BrowserError> {
        self.record(css);
        self.inner.find(css).await
    }

    async fn find_all(&self, css: &str) -> Result<Vec<Self::Element>, BrowserError> {
        self.record(css);
        self.inner.find_all(css).await
    }

    async fn find_in(
        &self,
        parent: &Self::Element,
        css: &str,
    ) -> Result<Self::Element, BrowserError> {
        self.record(css);
        self.inner.find_in(parent, css).await
    }

    async fn find_all_in(
        &self,
        parent: &Self::Element,
        css: &str,
    ) -> Result<Vec<Self::Element>, BrowserError> {
        self.record(css);
        self.inner.find_all_in(parent, css).await
    }

    async fn text(&self, element: &Self::Element) -> Result<String, BrowserError> {
        self.inner.text(element).await
    }

    async fn attr(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        self.inner.attr(element, name).await
    }

    async fn click(&self, element: &Self::Element) -> Result<(), BrowserError> {
        self.inner.click(element).await
    }

    async fn wait_for(
        &self,
        css: &str,
        timeout: Duration,
    ) -> Result<Self::Element, BrowserError> {
        self.record(css);
        self.inner.wait_for(css, timeout).await
    }
}
