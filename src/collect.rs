use crate::browser::{Browser, BrowserError};
use crate::extract::status::{self, ListingSummary, Verdict};
use crate::sites::SiteLayout;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// How many results pages to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLimit {
    /// Until a page comes back without cards.
    #[default]
    All,
    Pages(u32),
}

impl PageLimit {
    fn allows(self, page: u32) -> bool {
        match self {
            PageLimit::All => true,
            PageLimit::Pages(max) => page <= max,
        }
    }
}

impl FromStr for PageLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("todas") || s.eq_ignore_ascii_case("all") {
            return Ok(PageLimit::All);
        }
        match s.parse::<u32>() {
            Ok(0) => Err("page count must be at least 1".to_string()),
            Ok(n) => Ok(PageLimit::Pages(n)),
            Err(_) => Err(format!("expected a page count or 'todas', got '{s}'")),
        }
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLimit::All => write!(f, "todas"),
            PageLimit::Pages(n) => write!(f, "{n}"),
        }
    }
}

/// Listings that passed the status gate, in page then card order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub accepted: Vec<ListingSummary>,
    statuses: HashMap<String, String>,
    /// Cards dropped because they were sold.
    pub skipped: usize,
    /// Cards dropped because no link could be read.
    pub dropped: usize,
    /// Results pages that had cards.
    pub pages: u32,
    /// Results page that could not be loaded, ending pagination early.
    pub failed_page: Option<u32>,
}

impl Collection {
    fn accept(&mut self, summary: ListingSummary) {
        self.statuses.insert(summary.url.clone(), summary.status.clone());
        self.accepted.push(summary);
    }

    /// Status recorded for `url`; a url seen twice keeps the later status.
    pub fn status_of(&self, url: &str) -> &str {
        self.statuses.get(url).map(String::as_str).unwrap_or_default()
    }
}

/// Walks the site's results pages and gates every card.
///
/// Stops after `limit` pages or at the first page without cards. A page
/// that fails to load also ends pagination, keeping what earlier pages
/// produced; only a fatal error is returned. Links repeated across pages
/// are kept each time they appear.
pub async fn collect<B: Browser>(
    browser: &mut B,
    layout: &SiteLayout,
    limit: PageLimit,
    settle: Duration,
) -> Result<Collection, BrowserError> {
    let mut collection = Collection::default();
    let mut page = 1;

    while limit.allows(page) {
        let url = layout.page_url(page);
        info!("Collecting links from page {}: {}", page, url);
        let cards = match load_cards(browser, layout, &url, settle).await {
            Ok(cards) => cards,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Results page {} failed, stopping pagination: {}", page, e);
                collection.failed_page = Some(page);
                break;
            }
        };
        info!("Items found on page {}: {}", page, cards.len());
        if cards.is_empty() {
            info!("No items found, collection finished");
            break;
        }

        for (index, card) in cards.iter().enumerate() {
            match status::evaluate(&*browser, &layout.cards, card, index + 1).await? {
                Verdict::Accept(summary) => collection.accept(summary),
                Verdict::Sold => collection.skipped += 1,
                Verdict::Unreachable => collection.dropped += 1,
            }
        }
        collection.pages = page;
        info!(
            "Links collected up to page {}: {}",
            page,
            collection.accepted.len()
        );
        page += 1;
    }

    Ok(collection)
}

async fn load_cards<B: Browser>(
    browser: &mut B,
    layout: &SiteLayout,
    url: &str,
    settle: Duration,
) -> Result<Vec<B::Element>, BrowserError> {
    browser.goto(url).await?;
    tokio::time::sleep(settle).await;
    browser.find_all(layout.cards.card).await
}
