use super::documents::{self, Documents};
use super::field::{FieldSpec, extract};
use crate::browser::Browser;
use crate::sites::{Site, SiteLayout};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Everything extracted from one listing page.
///
/// Every field is independently optional; a record is emitted even when
/// all of them are missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub site: Site,
    pub url: String,
    pub title: Option<String>,
    pub auction_type: Option<String>,
    pub process_number: Option<String>,
    pub price: Option<String>,
    /// Link to the auction notice (edital).
    pub notice_url: Option<String>,
    pub documents: Documents,
    pub description: Option<String>,
    pub status: String,
}

async fn field<B: Browser>(browser: &B, spec: &FieldSpec) -> Option<String> {
    match extract(browser, spec).await {
        Ok(value) => {
            info!("  [OK] {}: {}", spec.name, value);
            Some(value)
        }
        Err(absent) => {
            warn!("  [MISSING] {}", absent);
            None
        }
    }
}

/// Builds the record for the listing the browser is currently showing.
///
/// Each field is attempted regardless of how the others went.
pub async fn build<B: Browser>(
    browser: &B,
    layout: &SiteLayout,
    url: &str,
    status: &str,
    documents_wait: Duration,
) -> ListingRecord {
    let fields = &layout.fields;
    let title = field(browser, &fields.title).await;
    let auction_type = field(browser, &fields.auction_type).await;
    let process_number = field(browser, &fields.process_number).await;
    let price = field(browser, &fields.price).await;
    let notice_url = field(browser, &fields.notice).await;
    let documents = documents::resolve(browser, &layout.documents, documents_wait).await;
    let description = field(browser, &fields.description).await;

    ListingRecord {
        site: layout.site,
        url: url.to_string(),
        title,
        auction_type,
        process_number,
        price,
        notice_url,
        documents,
        description,
        status: status.to_string(),
    }
}
