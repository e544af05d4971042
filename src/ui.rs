use crate::app::{App, AppState, VISIBLE_ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Row, Table, Widget, Wrap},
};

const TITLE: &str = "leilões";

impl Widget for &App {
    /// Renders the user interface widgets.
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Scraping => self.render_scraping(area, buf),
            AppState::Done => self.render_records(area, buf),
            AppState::Failed => self.render_failure(area, buf),
        }
    }
}

fn frame() -> Block<'static> {
    Block::bordered()
        .title(TITLE)
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
}

impl App {
    fn render_scraping(&self, area: Rect, buf: &mut Buffer) {
        let block = frame();
        let inner_area = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3), // For the paragraph
                Constraint::Length(1), // For the gauge
                Constraint::Min(0),
            ])
            .split(inner_area);

        let paragraph = Paragraph::new(if self.progress_message.is_empty() {
            "Iniciando..."
        } else {
            self.progress_message.as_str()
        })
        .fg(Color::White)
        .bg(Color::Black)
        .centered();

        let num_dots = 20;
        let filled_dots = ((self.progress * num_dots as f64) as usize).min(num_dots);
        let empty_dots = num_dots - filled_dots;

        let mut spans = Vec::new();
        for _ in 0..filled_dots {
            spans.push(Span::styled(".", Style::default().fg(Color::Green)));
        }
        for _ in 0..empty_dots {
            spans.push(Span::styled(".", Style::default().fg(Color::DarkGray)));
        }

        let gauge_paragraph = Paragraph::new(Line::from(spans)).centered();

        paragraph.render(chunks[1], buf);
        gauge_paragraph.render(chunks[2], buf);
    }

    fn render_records(&self, area: Rect, buf: &mut Buffer) {
        let block = frame();
        let inner_area = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner_area);

        let header = Row::new(["Site", "Título", "Valor", "Status"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let rows = self
            .records
            .iter()
            .enumerate()
            .skip(self.selection.offset)
            .take(VISIBLE_ROWS)
            .map(|(i, record)| {
                let row = Row::new([
                    record.site.to_string(),
                    record.title.clone().unwrap_or_default(),
                    record.price.clone().unwrap_or_default(),
                    record.status.clone(),
                ]);
                if i == self.selection.index {
                    row.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    row
                }
            });

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Fill(1),
                Constraint::Length(18),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .fg(Color::Cyan)
        .bg(Color::Black);

        let summary = Paragraph::new(self.summary.as_str())
            .fg(Color::White)
            .wrap(Wrap { trim: true });

        table.render(chunks[0], buf);
        summary.render(chunks[1], buf);
    }

    fn render_failure(&self, area: Rect, buf: &mut Buffer) {
        let text = format!(
            "Erro: {}\n\nPressione q para sair.",
            self.error.as_deref().unwrap_or("desconhecido")
        );
        Paragraph::new(text)
            .block(frame())
            .fg(Color::Red)
            .bg(Color::Black)
            .centered()
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
