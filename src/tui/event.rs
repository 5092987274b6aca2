//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::export::{ExportArtifact, export_report, export_scope};
use crate::models::ComissaoResponse;

use super::app::{App, Tab};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// A freshly computed report replaces the current one.
    ReportLoaded(Box<ComissaoResponse>),
    /// An export was saved to this path.
    Exported(std::path::PathBuf),
    /// An export or request failed.
    Failed(String),
    /// Request to quit the application.
    Quit,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::ReportLoaded(report) => {
            app.load_report(*report);
            app.show_info("relatório carregado");
            None
        }
        Message::Exported(path) => {
            app.show_info(format!("exportado: {}", path.display()));
            None
        }
        Message::Failed(error) => {
            app.show_error(error);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Actions that require external handling (e.g., writing files).
#[derive(Debug)]
pub enum Action {
    /// Save a rendered workbook into the output directory.
    Save(ExportArtifact),
    /// Fetch the report again from where it came from.
    Reload,
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_status();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        _ => {}
    }

    handle_normal_mode(app, key)
}

/// Handles keys shared by every tab, then delegates.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        // Tab navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }

        // Whole-report export
        KeyCode::Char('X') => {
            let result = export_report(&app.report, app.export_date);
            finish_export(app, result)
        }

        // Recompute or reload the report from its source
        KeyCode::Char('r') => {
            app.show_info("recarregando...");
            Some(Action::Reload)
        }

        _ => match app.current_tab() {
            Tab::Tree => handle_tree_tab_keys(app, key),
            Tab::Summary => handle_summary_tab_keys(app, key),
        },
    }
}

/// Handles keys for the tree tab.
fn handle_tree_tab_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.select_first();
            None
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            None
        }

        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected();
            None
        }
        KeyCode::Char('a') => {
            app.expand_all();
            None
        }
        KeyCode::Char('t') => {
            app.expand_top_level();
            None
        }
        KeyCode::Char('c') => {
            app.collapse_all();
            None
        }

        // Export the selected seller, contador or renewal partner
        KeyCode::Char('x') => export_selected(app),

        _ => None,
    }
}

/// Handles keys for the summary tab.
fn handle_summary_tab_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_summary_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_summary_up();
            None
        }
        _ => None,
    }
}

fn export_selected(app: &mut App) -> Option<Action> {
    let result = {
        let lines = app.lines();
        let line = lines.get(app.selected)?;
        line.node
            .scope()
            .map(|scope| export_scope(scope, app.export_date))
    };
    match result {
        Some(result) => finish_export(app, result),
        None => {
            app.show_error("selecione um vendedor, contador ou parceiro para exportar");
            None
        }
    }
}

fn finish_export(app: &mut App, result: crate::Result<ExportArtifact>) -> Option<Action> {
    match result {
        Ok(artifact) => Some(Action::Save(artifact)),
        Err(e) => {
            tracing::warn!(error = %e, "export failed");
            app.show_error(format!("falha ao exportar: {e}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use crossterm::event::KeyEventKind;

    use super::*;

    fn key(code: KeyCode) -> Message {
        Message::Input(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        }))
    }

    fn app() -> App {
        let report = ComissaoResponse::from_json(
            r#"{
                "sellers": [{
                    "nome": "Ana Souza", "faixa_comissao": "10%",
                    "total_vendas": 100, "total_comissao": 10,
                    "vendas": [{"numero_pedido": "P1", "numero_protocolo": "X1", "valor_venda": 100, "comissao": 10}]
                }],
                "parceiro_renovacao": null
            }"#,
        )
        .unwrap();
        App::new(
            report,
            PathBuf::from("."),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        assert!(update(&mut app, key(KeyCode::Char('q'))).is_none());
        assert!(app.should_quit);
    }

    #[test]
    fn navigation_and_toggle() {
        let mut app = app();
        // Ana, Vendas Diretas
        assert_eq!(app.lines().len(), 2);
        update(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected, 1);
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.lines().len(), 3);
        update(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.lines().len(), 1);
        assert_eq!(app.selected, 0);
        update(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.lines().len(), 3);
        update(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.lines().len(), 2);
    }

    #[test]
    fn x_exports_selected_seller() {
        let mut app = app();
        match update(&mut app, key(KeyCode::Char('x'))) {
            Some(Action::Save(artifact)) => {
                assert_eq!(
                    artifact.file_name,
                    "commissao-vendedor-Ana-Souza-2025-01-31.xlsx"
                );
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn x_on_direct_sales_shows_error() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('j')));
        assert!(update(&mut app, key(KeyCode::Char('x'))).is_none());
        assert!(app.status.is_some());
    }

    #[test]
    fn shift_x_exports_report_from_any_tab() {
        let mut app = app();
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_tab(), Tab::Summary);
        match update(&mut app, key(KeyCode::Char('X'))) {
            Some(Action::Save(artifact)) => {
                assert_eq!(artifact.file_name, "commissao-2025-01-31.xlsx");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn r_requests_reload() {
        let mut app = app();
        assert!(matches!(
            update(&mut app, key(KeyCode::Char('r'))),
            Some(Action::Reload)
        ));
    }

    #[test]
    fn report_loaded_replaces_report() {
        let mut app = app();
        update(
            &mut app,
            Message::ReportLoaded(Box::new(ComissaoResponse::default())),
        );
        assert!(app.report.is_empty());
        assert!(app.lines().is_empty());
    }
}
