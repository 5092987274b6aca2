//! Summary tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::export::column_widths;
use crate::rows::{Cell, RenewalVisibility, Scope};
use crate::tui::app::App;
use crate::tui::components::{status_bar, tab_bar};
use crate::tui::format::brl;

/// Renders the summary tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Summary table
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_summary(frame, main_layout[2], app);
    render_keybindings(frame, main_layout[3]);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Resumo por participante ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let table = Scope::Report(&app.report).summary_table(RenewalVisibility::Shown);
    if table.is_empty() {
        let para = Paragraph::new(Span::styled(
            "Nenhum resultado para o período.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(para, area);
        return;
    }

    let widths: Vec<Constraint> = column_widths(&table)
        .into_iter()
        .map(|w| Constraint::Length(w as u16))
        .collect();

    let header = Row::new(table.headers.iter().copied()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = table
        .rows
        .iter()
        .skip(app.summary_offset)
        .map(|cells| Row::new(cells.iter().map(cell_text)))
        .collect();

    let widget = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(widget, area);
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Amount(amount) => brl(*amount),
        other => other.to_string(),
    }
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[j/k]scroll [X]export all [r]reload [Tab]hierarchy [q]quit";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
