//! # narranode
//!
//! A branching-narrative engine: stories are graphs of dialogue nodes whose
//! choices are gated by, and mutate, a small numeric player state. The crate
//! provides the graph data model, the playback state machine, lossless JSON
//! persistence, and an optional integrity lint pass, plus a terminal player.
//!
//! Story definitions are immutable during playback; every session owns its
//! own [`PlayerState`], so any number of playthroughs can share one graph.
//!
//! ## Quick Start
//!
//! ```rust
//! use narranode::{Choice, NextAction, Node, PlaybackEngine, StoryGraph};
//!
//! # fn main() -> Result<(), narranode::EngineError> {
//! let mut story = StoryGraph::new();
//!
//! let mut gate = Node::new("gate", "Guard", "The toll is 5 gold.");
//! gate.add_choice(
//!     Choice::new("Pay the toll", "inside")
//!         .require("gold", 5)
//!         .effect("gold", -5),
//! );
//! gate.add_choice(Choice::new("Turn back", "road"));
//! story.add_node(gate);
//! story.add_node(Node::new("inside", "Guard", "Welcome to the city."));
//! story.add_node(Node::new("road", "Narrator", "The road stretches on."));
//!
//! let mut engine = PlaybackEngine::new(&story, "gate");
//!
//! let step = engine.step();
//! assert_eq!(step.next, NextAction::WaitChoice);
//! let view = step.view.unwrap();
//! // Starting gold is 0, so the paid entrance is locked.
//! assert_eq!(view.available.len(), 1);
//! assert_eq!(view.locked.len(), 1);
//!
//! engine.choose(1)?;
//! let step = engine.step();
//! assert_eq!(step.next, NextAction::Halt);
//! # Ok(())
//! # }
//! ```
//!
//! ## Persistence
//!
//! ```rust
//! use narranode::{Node, StoryGraph, storage};
//!
//! # fn main() -> Result<(), narranode::StorageError> {
//! let mut story = StoryGraph::new();
//! story.add_node(Node::new("start", "Narrator", "Once upon a time."));
//!
//! let bytes = storage::save(&story)?;
//! let restored = storage::load(&bytes)?;
//! assert_eq!(restored, story);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod engine;
pub mod graph;
pub mod lint;
pub mod storage;
pub mod types;

pub use engine::{Ending, EngineError, NextAction, PlaybackEngine, StepResult};
pub use graph::StoryGraph;
pub use lint::{LintLevel, LintResult, lint};
pub use storage::{StorageError, from_document, load, save, to_document};
pub use types::node::{Choice, Node, StatMap};
pub use types::state::{PlayerState, StatChange};
pub use types::view::{ChoiceView, LockedChoice, NodeView};
