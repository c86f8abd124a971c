//! WebCLI Navigation
//!
//! - Address bar input normalization (`normalize`) and its compact display
//!   form (`simplify`)
//! - Linear back/forward history with a single current position

mod address;
mod history;

pub use address::{normalize, simplify};
pub use history::{History, NavigationNode, NodeId};
