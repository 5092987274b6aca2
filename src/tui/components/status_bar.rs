//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, StatusLevel};
use crate::tui::format::brl;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let total_value: rust_decimal::Decimal = app.report.sellers.iter().map(|s| s.total_value).sum();

    let partner_span = match &app.report.renewal_partner {
        Some(partner) => Span::styled(
            format!(" RP: {} ", partner.name),
            Style::default().fg(Color::Magenta),
        ),
        None => Span::styled(" sem parceiro ", Style::default().fg(Color::Gray)),
    };

    let status_span = match &app.status {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Error => Color::Red,
            };
            Span::styled(format!(" {} ", status.message), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let tab_info = format!(" {}/{} ", app.active_tab + 1, app.tabs.len());

    let line = Line::from(vec![
        Span::styled(
            format!(" {} vendedores ", app.report.sellers.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("│"),
        Span::styled(format!(" {} ", brl(total_value)), Style::default().fg(Color::Cyan)),
        Span::raw("│"),
        partner_span,
        Span::raw("│"),
        Span::styled(
            format!(" {} abertos ", app.expand.len()),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("│"),
        status_span,
        Span::raw(format!(
            "{:>width$}",
            tab_info,
            width = area.width.saturating_sub(90) as usize
        )),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
