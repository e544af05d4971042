use crate::browser::{Browser, BrowserError, SnapshotBrowser, WebDriverSession};
use crate::collect::{PageLimit, collect};
use crate::config::{Config, Timing};
use crate::event::{AppEvent, Event};
use crate::export::{self, Format};
use crate::extract::{ListingRecord, record};
use crate::sites::{Site, SiteLayout};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Which sites to scrape and how deep.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub sites: Vec<Site>,
    pub max_pages: PageLimit,
}

/// One full invocation: the request plus where its records go.
#[derive(Debug, Clone)]
pub struct Job {
    pub request: ScrapeRequest,
    /// Scrape recorded pages instead of the live sites.
    pub snapshot_dir: Option<PathBuf>,
    pub output: PathBuf,
    pub format: Format,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<ListingRecord>,
    /// Listings left out because they were sold.
    pub skipped_sold: usize,
    /// Cards without a readable link.
    pub dropped: usize,
    /// Listings whose tab could not be opened or closed.
    pub failed: usize,
    /// Sites whose first results page could not be loaded.
    pub failed_sites: Vec<Site>,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub report: RunReport,
    pub path: PathBuf,
}

/// Forwards progress to the terminal front end, if there is one.
#[derive(Debug, Clone, Default)]
pub struct Progress(Option<mpsc::UnboundedSender<Event>>);

impl Progress {
    pub fn new(sender: mpsc::UnboundedSender<Event>) -> Self {
        Self(Some(sender))
    }

    pub fn silent() -> Self {
        Self(None)
    }

    pub fn report(&self, fraction: f64, message: impl Into<String>) {
        if let Some(sender) = &self.0 {
            let _ = sender.send(Event::App(AppEvent::SetProgress(
                fraction.clamp(0.0, 1.0),
                message.into(),
            )));
        }
    }
}

/// Opens a listing in its own tab, extracts it and closes the tab again.
pub async fn scrape_listing<B: Browser>(
    browser: &mut B,
    layout: &SiteLayout,
    url: &str,
    status: &str,
    timing: &Timing,
) -> Result<ListingRecord, BrowserError> {
    browser.open_tab(url).await?;
    tokio::time::sleep(timing.listing_settle()).await;
    let record = record::build(&*browser, layout, url, status, timing.documents_wait()).await;
    browser.close_tab().await?;
    tokio::time::sleep(timing.tab_close_settle()).await;
    Ok(record)
}

/// Collects and extracts every requested site in order.
///
/// A listing that fails to open is logged and skipped, and so is a site
/// whose first results page cannot be loaded. A later results page that
/// fails ends that site's pagination, and the listings already collected
/// are still extracted. Only a lost session ends the run early.
pub async fn run<B: Browser>(
    browser: &mut B,
    request: &ScrapeRequest,
    timing: &Timing,
    progress: &Progress,
) -> Result<RunReport, BrowserError> {
    let mut report = RunReport::default();
    let span = 1.0 / request.sites.len().max(1) as f64;

    for (n, site) in request.sites.iter().enumerate() {
        let layout = site.layout();
        let base = n as f64 * span;
        info!("Scraping {} ({} pages)", site, request.max_pages);
        progress.report(base, format!("🔗 Coletando links - {site}..."));

        let collection =
            collect(browser, layout, request.max_pages, timing.results_settle(layout)).await?;
        match collection.failed_page {
            Some(1) => {
                error!("{}: first results page could not be loaded", site);
                report.failed_sites.push(*site);
                continue;
            }
            Some(page) => warn!("{}: results truncated at page {}", site, page),
            None => {}
        }
        info!(
            "{}: {} listings to process, {} sold skipped, {} dropped",
            site,
            collection.accepted.len(),
            collection.skipped,
            collection.dropped
        );
        report.skipped_sold += collection.skipped;
        report.dropped += collection.dropped;

        let total = collection.accepted.len();
        for (i, summary) in collection.accepted.iter().enumerate() {
            progress.report(
                base + span * (0.1 + 0.9 * i as f64 / total as f64),
                format!("🏠 {site}: imóvel {}/{}", i + 1, total),
            );
            info!("Processing listing {}/{}: {}", i + 1, total, summary.url);
            let status = collection.status_of(&summary.url);
            match scrape_listing(browser, layout, &summary.url, status, timing).await {
                Ok(record) => report.records.push(record),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!("Failed to scrape {}: {}", summary.url, e);
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}

/// Runs a job end to end: browser session, scrape, export.
///
/// The WebDriver session is shut down whether or not the scrape succeeded.
pub async fn execute(config: &Config, job: &Job, progress: &Progress) -> color_eyre::Result<Outcome> {
    let report = match &job.snapshot_dir {
        Some(dir) => {
            let mut browser = SnapshotBrowser::from_dir(dir)?;
            run(&mut browser, &job.request, &Timing::instant(), progress).await?
        }
        None => {
            progress.report(0.0, "🚀 Starting webdriver...");
            let mut session = WebDriverSession::start(&config.webdriver).await?;
            let result = run(&mut session, &job.request, &config.timing, progress).await;
            if let Err(e) = session.shutdown().await {
                warn!("Failed to close webdriver session: {}", e);
            }
            result?
        }
    };

    progress.report(1.0, format!("💾 Exportando {} imóveis...", report.records.len()));
    export::save(&job.output, job.format, &report.records, &job.request.sites)?;
    Ok(Outcome {
        report,
        path: job.output.clone(),
    })
}
