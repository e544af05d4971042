use crate::config::Config;
use crate::event::{AppEvent, Event, EventHandler};
use crate::extract::ListingRecord;
use crate::runner::{self, Job, Outcome, Progress};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
};
use tracing::{error, info};

/// Rows of the record table kept on screen.
pub const VISIBLE_ROWS: usize = 25;

/// Phases of a scrape as shown on screen.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum AppState {
    /// The scrape is running.
    #[default]
    Scraping,
    /// Records were collected and exported.
    Done,
    /// The scrape stopped with an error.
    Failed,
}

/// Terminal front end driving one scrape job.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// The application state.
    pub state: AppState,
    /// Event handler.
    pub events: EventHandler,
    /// Progress value from 0.0 to 1.0 representing scraping completion.
    pub progress: f64,
    /// Current status message displayed to user.
    pub progress_message: String,
    /// Scraped listing records.
    pub records: Vec<ListingRecord>,
    /// One-line summary of the finished run.
    pub summary: String,
    /// Error that stopped the run.
    pub error: Option<String>,
    /// Table selection and scroll position.
    pub selection: Selection,
}

/// Selected row of the record table and the first row on screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub offset: usize,
}

impl Selection {
    /// Moves to `index`, clamped to `len` rows, scrolling so it stays visible.
    pub fn select(&mut self, index: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.index = index.min(len - 1);
        if self.index < self.offset {
            self.offset = self.index;
        } else if self.index >= self.offset + VISIBLE_ROWS {
            self.offset = self.index + 1 - VISIBLE_ROWS;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            running: true,
            state: AppState::default(),
            events: EventHandler::new(),
            progress: 0.0,
            progress_message: String::new(),
            records: Vec::new(),
            summary: String::new(),
            error: None,
            selection: Selection::default(),
        }
    }
}

/// One-line description of a finished run.
pub fn summarize(outcome: &Outcome) -> String {
    let report = &outcome.report;
    let mut text = format!(
        "{} imóveis salvos em {} ({} vendidos ignorados, {} sem link, {} com falha)",
        report.records.len(),
        outcome.path.display(),
        report.skipped_sold,
        report.dropped,
        report.failed
    );
    if !report.failed_sites.is_empty() {
        let sites: Vec<String> = report.failed_sites.iter().map(ToString::to_string).collect();
        text.push_str(&format!("; sites com erro: {}", sites.join(", ")));
    }
    text
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application's main loop.
    pub async fn run(
        mut self,
        mut terminal: DefaultTerminal,
        config: Config,
        job: Job,
    ) -> color_eyre::Result<()> {
        self.start(config, job);
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key_event) = event {
                        self.handle_key_events(key_event)?
                    }
                }
                Event::App(app_event) => match app_event {
                    AppEvent::Quit => self.quit(),
                    AppEvent::SetProgress(progress, message) => {
                        self.progress = progress;
                        self.progress_message = message;
                    }
                    AppEvent::Finished(outcome) => {
                        self.summary = summarize(&outcome);
                        info!("{}", self.summary);
                        self.records = outcome.report.records;
                        self.selection = Selection::default();
                        self.state = AppState::Done;
                    }
                    AppEvent::Failed(message) => {
                        self.error = Some(message);
                        self.state = AppState::Failed;
                    }
                },
            }
        }
        Ok(())
    }

    /// Spawns the scrape; its progress and result come back as events.
    fn start(&mut self, config: Config, job: Job) {
        let sender = self.events.sender.clone();
        tokio::spawn(async move {
            let progress = Progress::new(sender.clone());
            let event = match runner::execute(&config, &job, &progress).await {
                Ok(outcome) => AppEvent::Finished(Box::new(outcome)),
                Err(e) => {
                    error!("Scrape failed: {:?}", e);
                    AppEvent::Failed(format!("{e:#}"))
                }
            };
            let _ = sender.send(Event::App(event));
        });
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> color_eyre::Result<()> {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Down | KeyCode::Char('j') => self.select(self.selection.index.saturating_add(1)),
            KeyCode::Up | KeyCode::Char('k') => self.select(self.selection.index.saturating_sub(1)),
            KeyCode::PageDown => self.select(self.selection.index.saturating_add(VISIBLE_ROWS)),
            KeyCode::PageUp => self.select(self.selection.index.saturating_sub(VISIBLE_ROWS)),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            _ => {}
        }
        Ok(())
    }

    fn select(&mut self, index: usize) {
        self.selection.select(index, self.records.len());
    }

    /// Handles the tick event of the terminal.
    pub fn tick(&self) {}

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::documents::Documents;
    use crate::runner::RunReport;
    use crate::sites::Site;
    use std::path::PathBuf;

    fn record(n: usize) -> ListingRecord {
        ListingRecord {
            site: Site::Alfa,
            url: format!("https://www.alfaleiloes.com/leilao/{n}"),
            title: Some(format!("Lote {n}")),
            auction_type: None,
            process_number: None,
            price: None,
            notice_url: None,
            documents: Documents::new(),
            description: None,
            status: "Aberto".into(),
        }
    }

    #[test]
    fn test_selection_stays_visible() {
        let mut selection = Selection::default();

        selection.select(30, 60);
        assert_eq!(selection, Selection { index: 30, offset: 6 });

        selection.select(usize::MAX, 60);
        assert_eq!(selection, Selection { index: 59, offset: 35 });

        selection.select(2, 60);
        assert_eq!(selection, Selection { index: 2, offset: 2 });
    }

    #[test]
    fn test_selection_without_records() {
        let mut selection = Selection::default();
        selection.select(5, 0);
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_summary_mentions_failed_sites() {
        let outcome = Outcome {
            report: RunReport {
                records: vec![record(1)],
                skipped_sold: 2,
                dropped: 0,
                failed: 1,
                failed_sites: vec![Site::Mega],
            },
            path: PathBuf::from("leiloes.csv"),
        };
        assert_eq!(
            summarize(&outcome),
            "1 imóveis salvos em leiloes.csv (2 vendidos ignorados, 0 sem link, 1 com falha); \
             sites com erro: Mega Leilões"
        );
    }
}
