//! Story content types: dialogue nodes and the choice edges between them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open-ended mapping from state-variable name to a signed integer.
///
/// Used both for effect deltas and for requirement thresholds. Story content
/// may introduce new variables ad hoc, so this stays an ordinary map rather
/// than a fixed struct.
pub type StatMap = BTreeMap<String, i64>;

/// One screen of dialogue.
///
/// A node either advances linearly through `next` or branches through
/// `choices`. When both are set, non-empty `choices` take precedence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Unique identifier within a graph.
    pub id: String,
    /// Display name of whoever is talking.
    pub speaker: String,
    /// Dialogue body.
    pub text: String,
    /// Automatic successor for linear flow, used when `choices` is empty.
    pub next: Option<String>,
    /// Player-selectable edges. Order is display order and the numbering
    /// offered to the player.
    pub choices: Vec<Choice>,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        speaker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            speaker: speaker.into(),
            text: text.into(),
            next: None,
            choices: Vec::new(),
        }
    }

    /// Set the linear successor.
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Append a branching path.
    pub fn add_choice(&mut self, choice: Choice) {
        self.choices.push(choice);
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// A labeled edge to another node, optionally gated by requirements and
/// carrying state deltas.
///
/// The target id need not resolve at construction time. Dangling targets are
/// a traversal-time concern, so graphs can be authored incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Label shown to the player.
    pub text: String,
    /// Target node id.
    pub next_id: String,
    /// State deltas applied when the choice is taken.
    #[serde(default)]
    pub effects: StatMap,
    /// Minimum thresholds the state must meet for the choice to be selectable.
    #[serde(default)]
    pub requirements: StatMap,
}

impl Choice {
    pub fn new(text: impl Into<String>, next_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_id: next_id.into(),
            effects: StatMap::new(),
            requirements: StatMap::new(),
        }
    }

    /// Add a state delta applied when this choice is taken.
    pub fn effect(mut self, name: impl Into<String>, delta: i64) -> Self {
        self.effects.insert(name.into(), delta);
        self
    }

    /// Add a minimum-threshold gate on a state variable.
    pub fn require(mut self, name: impl Into<String>, threshold: i64) -> Self {
        self.requirements.insert(name.into(), threshold);
        self
    }
}
