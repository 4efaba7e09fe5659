//! Core data types: story content, session state, and per-step views

pub mod node;
pub mod state;
pub mod view;

pub use node::{Choice, Node, StatMap};
pub use state::{PlayerState, StatChange};
pub use view::{ChoiceView, LockedChoice, NodeView};
