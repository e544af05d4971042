use crate::browser::{Browser, BrowserError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Status label that marks a listing as already sold.
pub const SOLD: &str = "vendido";

/// Selectors inside one search-result card.
#[derive(Debug, Clone, Copy)]
pub struct CardLayout {
    /// Every card on a results page.
    pub card: &'static str,
    /// Status label, relative to the card.
    pub status: &'static str,
    /// Anchor to the listing page, relative to the card.
    pub link: &'static str,
}

/// A listing discovered on a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub url: String,
    /// Raw status text, empty when the card had none.
    pub status: String,
}

/// Outcome of running one card through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept(ListingSummary),
    /// Already sold; never opened.
    Sold,
    /// No link could be read; the listing cannot be scraped.
    Unreachable,
}

pub fn is_sold(status: &str) -> bool {
    status.trim().to_lowercase() == SOLD
}

/// Reads a card's status and link and decides whether it moves on to
/// detailed extraction.
pub async fn evaluate<B: Browser>(
    browser: &B,
    layout: &CardLayout,
    card: &B::Element,
    index: usize,
) -> Result<Verdict, BrowserError> {
    let status = match browser.find_in(card, layout.status).await {
        Ok(element) => match browser.text(&element).await {
            Ok(text) => text.trim().to_string(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => String::new(),
        },
        Err(e) if e.is_fatal() => return Err(e),
        Err(_) => String::new(),
    };

    if is_sold(&status) {
        info!("  Item {} has status '{}', skipping", index, status);
        return Ok(Verdict::Sold);
    }

    let link = match browser.find_in(card, layout.link).await {
        Ok(anchor) => browser.attr(&anchor, "href").await,
        Err(e) => Err(e),
    };
    match link {
        Ok(Some(url)) if !url.trim().is_empty() => {
            info!("  [OK] Item {}: {} (status: {})", index, url, status);
            Ok(Verdict::Accept(ListingSummary {
                url: url.trim().to_string(),
                status,
            }))
        }
        Ok(_) => {
            warn!("  Item {}: link has no href", index);
            Ok(Verdict::Unreachable)
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!("  Item {}: {}", index, e);
            Ok(Verdict::Unreachable)
        }
    }
}
