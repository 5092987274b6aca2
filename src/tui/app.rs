//! Application state for the TUI.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;

use crate::models::ComissaoResponse;
use crate::rows::summary::summary_rows;
use crate::tree::{ExpandState, TreeLine, visible_lines};

/// Status messages clear after this many seconds.
const STATUS_TIMEOUT_SECS: u64 = 5;

/// Central application state container.
pub struct App {
    // -- Report State --
    /// Report being browsed.
    pub report: ComissaoResponse,
    /// Expanded tree nodes.
    pub expand: ExpandState,

    // -- Tab State --
    pub tabs: Vec<Tab>,
    pub active_tab: usize,

    // -- UI State --
    /// Index of the selected line in the tree tab.
    pub selected: usize,
    /// First visible row of the summary table.
    pub summary_offset: usize,
    /// Message shown in the status bar (clears after timeout).
    pub status: Option<StatusMessage>,

    // -- Export --
    /// Directory exported workbooks are saved into.
    pub output_dir: PathBuf,
    /// Date stamped into export file names.
    pub export_date: NaiveDate,

    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the browser state with top-level sellers and the renewal
    /// partner expanded.
    pub fn new(report: ComissaoResponse, output_dir: PathBuf, export_date: NaiveDate) -> Self {
        let mut expand = ExpandState::new();
        expand.expand_initial(&report);
        Self {
            report,
            expand,
            tabs: vec![Tab::Tree, Tab::Summary],
            active_tab: 0,
            selected: 0,
            summary_offset: 0,
            status: None,
            output_dir,
            export_date,
            should_quit: false,
        }
    }

    /// Replaces the report and resets the expansion to its initial state.
    pub fn load_report(&mut self, report: ComissaoResponse) {
        self.expand.expand_initial(&report);
        self.report = report;
        self.selected = 0;
        self.summary_offset = 0;
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
        }
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = self
                .active_tab
                .checked_sub(1)
                .unwrap_or(self.tabs.len() - 1);
        }
    }

    /// Tree lines visible under the current expansion.
    pub fn lines(&self) -> Vec<TreeLine<'_>> {
        visible_lines(&self.report, &self.expand)
    }

    pub fn select_next(&mut self) {
        let len = self.lines().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.lines().len().saturating_sub(1);
    }

    /// Toggles the selected node. Sale leaves and childless nodes are left
    /// alone.
    pub fn toggle_selected(&mut self) {
        let key = self
            .lines()
            .into_iter()
            .nth(self.selected)
            .filter(|line| line.has_children)
            .and_then(|line| line.key);
        if let Some(key) = key {
            self.expand.toggle(key);
            self.clamp_selection();
        }
    }

    pub fn expand_all(&mut self) {
        self.expand.expand_all(&self.report);
    }

    pub fn expand_top_level(&mut self) {
        self.expand.expand_top_level(&self.report);
        self.clamp_selection();
    }

    pub fn collapse_all(&mut self) {
        self.expand.collapse_all();
        self.clamp_selection();
    }

    /// Keeps the selection on a visible line after lines disappear.
    fn clamp_selection(&mut self) {
        let len = self.lines().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn scroll_summary_down(&mut self) {
        let rows = summary_rows(&self.report.sellers, self.report.renewal_partner.as_ref()).len();
        if self.summary_offset + 1 < rows {
            self.summary_offset += 1;
        }
    }

    pub fn scroll_summary_up(&mut self) {
        self.summary_offset = self.summary_offset.saturating_sub(1);
    }

    /// Shows an informational message in the status bar.
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(message, StatusLevel::Info));
    }

    /// Shows an error message in the status bar.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(message, StatusLevel::Error));
    }

    /// Clears status messages older than the timeout.
    pub fn clear_stale_status(&mut self) {
        if let Some(ref status) = self.status
            && status.timestamp.elapsed() > std::time::Duration::from_secs(STATUS_TIMEOUT_SECS)
        {
            self.status = None;
        }
    }
}

/// Tab types in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Expandable seller / contador / sale tree.
    Tree,
    /// Flat summary table of the whole report.
    Summary,
}

impl Tab {
    /// Returns the display title for the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Tree => "Hierarquia",
            Tab::Summary => "Resumo",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Status bar message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
    /// When the message was shown.
    pub timestamp: Instant,
}

impl StatusMessage {
    fn new(message: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Instant::now(),
        }
    }
}
