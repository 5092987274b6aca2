//! Tree identity and visibility model for the hierarchy browser.

pub mod identity;
pub mod state;
pub mod view;

pub use identity::{Identity, NodeRef, Subtree};
pub use state::ExpandState;
pub use view::{TreeLine, TreeNode, visible_lines};
