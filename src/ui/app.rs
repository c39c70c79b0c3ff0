use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::fetch::Fetcher;
use crate::store::BookStore;
use crate::view::{BookListView, FetchOutcome, FetchRequest};

use super::helpers::{centered_rect, checkbox, optional_cell, page_control_line};

/// Height of the title + search strip.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for the page control and key hints.
const FOOTER_HEIGHT: u16 = 3;
const SEARCH_PLACEHOLDER: &str = "Search books...";
const TITLE: &str = "BOOKS LIST";
const COLUMN_TITLES: [&str; 5] = ["Title", "Author", "Status", "Issued To", "Issued On"];

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Table,
    Searching,
}

/// Central application state: the book list plus the terminal-only bits
/// (input focus and the highlighted row).
pub struct App {
    view: BookListView,
    fetcher: Fetcher,
    cursor: usize,
    mode: Mode,
}

impl App {
    /// Mount the view: the first fetch starts immediately.
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        let mut app = Self {
            view: BookListView::new(),
            fetcher: Fetcher::new(store),
            cursor: 0,
            mode: Mode::Table,
        };
        let request = app.view.begin_fetch();
        app.start_fetch(request);
        app
    }

    pub fn view(&self) -> &BookListView {
        &self.view
    }

    /// Apply every fetch answer that has arrived. Called once per tick.
    pub fn pump_fetches(&mut self) {
        for outcome in self.fetcher.poll() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if let Some(request) = self.view.complete_fetch(outcome) {
            self.start_fetch(request);
        }
        self.clamp_cursor();
    }

    fn start_fetch(&mut self, request: FetchRequest) {
        self.fetcher.spawn(request);
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.mode {
            Mode::Searching => {
                self.handle_search_key(code);
                false
            }
            Mode::Table => self.handle_table_key(code),
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => self.mode = Mode::Table,
            KeyCode::Backspace => {
                self.view.pop_search_char();
                self.clamp_cursor();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.view.push_search_char(ch);
                self.clamp_cursor();
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('/') | KeyCode::Tab => self.mode = Mode::Searching,
            // The table (rows, header checkbox, page control) is hidden while
            // loading, so nothing below acts on it until the fetch answers.
            _ if self.view.loading() => {}
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.cursor + 1 < self.view.visible().len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.view.visible().len().saturating_sub(1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let id = self.view.visible().get(self.cursor).map(|book| book.id);
                if let Some(id) = id {
                    self.view.toggle_selected(id);
                }
            }
            KeyCode::Char('a') => self.view.toggle_all_selected(),
            KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown => {
                let request = self.view.next_page();
                self.after_page_change(request);
            }
            KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp => {
                let request = self.view.previous_page();
                self.after_page_change(request);
            }
            _ => {}
        }
        false
    }

    fn after_page_change(&mut self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            self.cursor = 0;
            self.start_fetch(request);
        }
    }

    fn clamp_cursor(&mut self) {
        let rows = self.view.visible().len();
        if self.cursor >= rows {
            self.cursor = rows.saturating_sub(1);
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        if self.view.loading() {
            self.draw_loader(frame, chunks[1]);
        } else {
            self.draw_table(frame, chunks[1]);
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(TITLE.len() as u16 + 4), Constraint::Min(10)])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let focused = self.mode == Mode::Searching;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        let query = self.view.search();
        let text = if query.is_empty() {
            Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(query.to_string())
        };
        frame.render_widget(Paragraph::new(text).block(block.clone()), chunks[1]);

        if focused {
            let inner = block.inner(chunks[1]);
            let cursor_x = inner.x + query.chars().count() as u16;
            frame.set_cursor_position((cursor_x.min(inner.right()), inner.y));
        }
    }

    fn draw_loader(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(40, 30, area);
        frame.render_widget(Clear, popup);
        let loader = Paragraph::new("Loading books...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loader, popup);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let visible = self.view.visible();

        let mut header_cells = vec![Cell::from(checkbox(self.view.all_selected()))];
        header_cells.extend(COLUMN_TITLES.iter().map(|title| Cell::from(*title)));
        let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

        let rows = visible.iter().map(|book| {
            Row::new(vec![
                Cell::from(checkbox(self.view.is_selected(book.id))),
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(book.status.clone()),
                Cell::from(optional_cell(book.issued_to.as_deref())),
                Cell::from(optional_cell(book.issued_on.as_deref())),
            ])
        });

        let widths = [
            Constraint::Length(4),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(12),
            Constraint::Fill(2),
            Constraint::Length(12),
        ];

        let block = Block::default().borders(Borders::ALL);
        let table = Table::new(rows, widths)
            .header(header)
            .block(block.clone())
            .row_highlight_style(Style::default().bg(Color::DarkGray));

        let mut state = TableState::default();
        if !visible.is_empty() && self.mode == Mode::Table {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(table, area, &mut state);

        if visible.is_empty() {
            let inner = block.inner(area);
            if inner.height > 2 {
                let body = Rect {
                    y: inner.y + 1,
                    height: inner.height - 1,
                    ..inner
                };
                let empty = Paragraph::new("No records")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(empty, centered_rect(100, 20, body));
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let page_line = if self.view.loading() {
            Line::from("")
        } else {
            page_control_line(
                self.view.page(),
                self.view.filtered_total_pages(),
                self.view.total_records(),
            )
        };

        let paragraph =
            Paragraph::new(vec![page_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match self.mode {
            Mode::Searching => Line::from(vec![
                Span::raw("Type to filter   "),
                Span::styled("[Backspace]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back to table"),
            ]),
            Mode::Table => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Move   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Select   "),
                Span::styled("[a]", key_style),
                Span::raw(" Select all   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Page   "),
                Span::styled("[/]", key_style),
                Span::raw(" Search   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }
}
