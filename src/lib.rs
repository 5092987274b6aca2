//! Commission hierarchy reporting engine.
//!
//! Takes the seller / contador / renewal-partner report computed by the
//! commission service and reconciles direct sales, projects it into detail
//! and summary tables, browses it as an expandable tree and exports any
//! subtree as an XLSX workbook.

pub mod client;
pub mod collate;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reconcile;
pub mod rows;
pub mod tree;
pub mod tui;

pub use error::{ComissaoError, Result};
