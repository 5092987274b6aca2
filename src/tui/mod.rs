//! Terminal browser for commission reports.
//!
//! Shows the seller / contador / sale hierarchy as an expandable tree plus
//! a flat summary table, and exports any subtree to a workbook.

pub mod app;
pub mod components;
pub mod event;
pub mod format;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
