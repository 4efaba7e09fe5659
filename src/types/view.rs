//! Presentation payload computed per playback step
//!
//! The engine only computes *what* to show. Rendering itself is a front-end
//! concern, so these types carry plain display data and nothing else.

use crate::types::node::StatMap;
use serde::{Deserialize, Serialize};

/// Everything a front end needs to show for one node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeView {
    pub node_id: String,
    pub speaker: String,
    pub text: String,
    /// Snapshot of the session state at render time.
    pub state: StatMap,
    /// Choices the player may select, in their original order. Selections
    /// are 1-based indices into this list.
    pub available: Vec<ChoiceView>,
    /// Choices whose requirements are not met. Shown, never selectable.
    pub locked: Vec<LockedChoice>,
}

impl NodeView {
    pub fn has_choices(&self) -> bool {
        !self.available.is_empty() || !self.locked.is_empty()
    }
}

/// A selectable choice as presented to the player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceView {
    pub text: String,
}

/// A gated-off choice, annotated with the requirement pairs that failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LockedChoice {
    pub text: String,
    pub unmet: StatMap,
}
