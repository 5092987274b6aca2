//! Hierarchy tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::rows::RenewalVisibility;
use crate::tree::{TreeLine, TreeNode};
use crate::tui::app::App;
use crate::tui::components::{status_bar, tab_bar};
use crate::tui::format::{brl, fit};

/// Width of the indented name column.
const NAME_WIDTH: usize = 44;

/// Renders the hierarchy tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Tree
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_tree(frame, main_layout[2], app);
    render_keybindings(frame, main_layout[3]);
}

fn render_tree(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Vendedores ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = app.lines();
    if lines.is_empty() {
        let para = Paragraph::new(Span::styled(
            "Nenhum resultado para o período.",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(para, inner);
        return;
    }

    // Scroll so the selected line stays in view
    let height = inner.height as usize;
    let offset = app.selected.saturating_sub(height.saturating_sub(1));

    let rendered: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, line)| {
            let mut rendered = tree_line(line);
            if i == app.selected {
                rendered = rendered.style(Style::default().bg(Color::Blue));
            }
            rendered
        })
        .collect();

    frame.render_widget(Paragraph::new(rendered), inner);
}

fn tree_line<'a>(line: &TreeLine<'_>) -> Line<'a> {
    let marker = if !line.has_children {
        "•"
    } else if line.expanded {
        "▼"
    } else {
        "▶"
    };
    let indent = "  ".repeat(line.depth);
    let show_renewal = line.renewal == RenewalVisibility::Shown;

    let (label, label_style, totals) = match &line.node {
        TreeNode::RenewalPartner(partner) => (
            format!("{} [Parceiro de Renovação {}]", partner.name, partner.bracket),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            format!(
                "{:>4} vendas  {:>16}  renovação {:>14}",
                partner.sale_count(),
                brl(partner.total_value),
                brl(partner.total_commission)
            ),
        ),
        TreeNode::Seller(seller) => {
            let mut totals = format!(
                "{:>4} vendas  {:>16}  vendedor {:>14}",
                seller.sales.len(),
                brl(seller.total_value),
                brl(seller.total_commission)
            );
            if show_renewal && !seller.total_renewal_commission.is_zero() {
                totals.push_str(&format!(
                    "  renovação {:>14}",
                    brl(seller.total_renewal_commission)
                ));
            }
            (
                format!("{} [{}]", seller.name, seller.bracket),
                Style::default().add_modifier(Modifier::BOLD),
                totals,
            )
        }
        TreeNode::DirectSales { seller, summary } => {
            let mut totals = format!(
                "{:>4} vendas  {:>16}  vendedor {:>14}",
                summary.count,
                brl(summary.total_value),
                brl(summary.total_commission)
            );
            if show_renewal && !summary.total_renewal_commission.is_zero() {
                totals.push_str(&format!(
                    "  renovação {:>14}",
                    brl(summary.total_renewal_commission)
                ));
            }
            (
                format!("Vendas Diretas [{}]", seller.bracket),
                Style::default().fg(Color::Cyan),
                totals,
            )
        }
        TreeNode::Contador { seller, contador } => {
            let mut totals = format!(
                "{:>4} vendas  {:>16}  contador {:>14}  vendedor {:>14}",
                contador.sales.len(),
                brl(contador.total_value),
                brl(contador.total_commission),
                brl(crate::reconcile::seller_commission_on(seller, contador))
            );
            if show_renewal && !contador.total_renewal_commission.is_zero() {
                totals.push_str(&format!(
                    "  renovação {:>14}",
                    brl(contador.total_renewal_commission)
                ));
            }
            (
                format!("{} [Contador {}]", contador.name, contador.bracket),
                Style::default().fg(Color::Yellow),
                totals,
            )
        }
        TreeNode::Sale {
            sale,
            seller_commission,
        } => {
            let mut label = format!(
                "{} / {} {}",
                sale.order_id,
                sale.protocol_id,
                sale.product.as_deref().unwrap_or("-")
            );
            if sale.is_renewal {
                label.push_str(" (renovação)");
            }
            let mut totals = match seller_commission {
                Some(seller_commission) => format!(
                    "{:>16}  contador {:>14}  vendedor {:>14}",
                    brl(sale.value),
                    brl(sale.commission),
                    brl(*seller_commission)
                ),
                None => format!(
                    "{:>16}  vendedor {:>14}",
                    brl(sale.value),
                    brl(sale.commission)
                ),
            };
            if show_renewal && sale.is_renewal && !sale.renewal_commission.is_zero() {
                totals.push_str(&format!(
                    "  renovação {:>14}",
                    brl(sale.renewal_commission)
                ));
            }
            (label, Style::default().fg(Color::Gray), totals)
        }
    };

    let name_width = NAME_WIDTH.saturating_sub(indent.len() + 2);
    Line::from(vec![
        Span::raw(indent),
        Span::styled(format!("{marker} "), Style::default().fg(Color::DarkGray)),
        Span::styled(fit(&label, name_width), label_style),
        Span::raw(" "),
        Span::raw(totals),
    ])
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[j/k]move [Enter]toggle [a]expand all [t]sellers [c]collapse [x]export node [X]export all [r]reload [Tab]summary [q]quit";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
