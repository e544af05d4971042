use crate::extract::documents::DocumentLayout;
use crate::extract::field::FieldSpec;
use crate::extract::status::CardLayout;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumIter};

pub mod alfa;
pub mod mega;

#[cfg(test)]
pub mod fixtures;

/// Auction houses the scraper knows the layout of.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    /// alfaleiloes.com
    #[strum(to_string = "Alfa Leilões")]
    Alfa,
    /// megaleiloes.com.br
    #[strum(to_string = "Mega Leilões")]
    Mega,
}

impl Site {
    pub fn layout(self) -> &'static SiteLayout {
        match self {
            Site::Alfa => &alfa::LAYOUT,
            Site::Mega => &mega::LAYOUT,
        }
    }
}

/// Field chains read from a listing page.
#[derive(Debug, Clone, Copy)]
pub struct ListingFields {
    pub title: FieldSpec,
    pub auction_type: FieldSpec,
    pub process_number: FieldSpec,
    pub price: FieldSpec,
    pub notice: FieldSpec,
    pub description: FieldSpec,
}

/// Everything site-specific about scraping one auction house.
#[derive(Debug, Clone, Copy)]
pub struct SiteLayout {
    pub site: Site,
    /// Search results URL with a `{page}` placeholder.
    pub search_url: &'static str,
    /// How long a results page takes to render.
    pub results_settle: Duration,
    pub cards: CardLayout,
    pub fields: ListingFields,
    pub documents: DocumentLayout,
}

impl SiteLayout {
    pub fn page_url(&self, page: u32) -> String {
        self.search_url.replace("{page}", &page.to_string())
    }
}
