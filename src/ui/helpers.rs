use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::pagination::page_strip;

/// Glyph for a checkbox cell.
pub(crate) fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Optional columns render as blank cells.
pub(crate) fn optional_cell(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Build the page control: a summary followed by the page-number strip, with
/// the current page bracketed.
pub(crate) fn page_control_line(page: usize, total_pages: usize, total_records: usize) -> Line<'static> {
    let summary = if total_pages == 0 {
        "No records   ".to_string()
    } else {
        format!("Page {page} of {total_pages} · {total_records} records   ")
    };

    let mut spans = vec![Span::raw(summary)];
    let muted = Style::default().fg(Color::DarkGray);
    let arrow_style = |enabled: bool| if enabled { Style::default() } else { muted };

    spans.push(Span::styled("‹ ", arrow_style(page > 1)));
    // First and last page, plus two pages either side of the current one.
    for entry in page_strip(total_pages, page, 1, 2, 2, 1) {
        match entry {
            Some(number) if number == page => spans.push(Span::styled(
                format!("[{number}] "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Some(number) => spans.push(Span::raw(format!("{number} "))),
            None => spans.push(Span::styled("… ", muted)),
        }
    }
    spans.push(Span::styled("›", arrow_style(page < total_pages)));

    Line::from(spans)
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}
