//! Playback: the traversal state machine over a story graph
//!
//! The engine walks node to node, filters choices against the session state,
//! applies effects on selection, and reports terminal outcomes. It computes
//! what to show; rendering and input belong to the front end.

use crate::graph::StoryGraph;
use crate::types::node::Node;
use crate::types::state::{PlayerState, StatChange};
use crate::types::view::{ChoiceView, LockedChoice, NodeView};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the front end should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextAction {
    /// A linear node was rendered. Confirm with the player, then call
    /// [`PlaybackEngine::advance`].
    WaitUser,
    /// Choices were rendered. Call [`PlaybackEngine::choose`] with a 1-based
    /// selection.
    WaitChoice,
    /// The playthrough is over; the step carries an [`Ending`].
    Halt,
}

/// Why a playthrough ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// The current node has neither choices nor a linear successor.
    EndOfStory,
    /// Choices exist but none meet the current requirements.
    DeadEnd,
    /// The current id does not resolve to a node.
    UnknownNode { id: String },
}

/// Result of rendering one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Rendered content. Absent only when the current id failed to resolve.
    pub view: Option<NodeView>,
    pub next: NextAction,
    /// Set exactly when `next` is [`NextAction::Halt`].
    pub ending: Option<Ending>,
}

/// Errors local to player input.
///
/// These never end a playthrough and never touch state: the caller re-prompts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("selection {given} out of range (1-{max})")]
    InvalidSelection { given: usize, max: usize },

    #[error("no choice is pending")]
    NoChoicePending,

    #[error("no linear advancement is pending")]
    NoAdvancePending,
}

/// Pending transition recorded by the last render.
enum Pending {
    None,
    /// Indices into the current node's choice list that passed the
    /// requirement check, in original order.
    Choice(Vec<usize>),
    Advance(String),
}

/// Walks a [`StoryGraph`] one node at a time.
///
/// The engine borrows the story definition immutably and owns one
/// [`PlayerState`] for the session, so two simultaneous playthroughs are just
/// two engines over the same graph. Dropping the engine is the only teardown;
/// the state can be taken back out afterwards.
pub struct PlaybackEngine<'a> {
    story: &'a StoryGraph,
    state: PlayerState,
    current: String,
    pending: Pending,
}

impl<'a> PlaybackEngine<'a> {
    /// Start a session at `start` with the default seeded stats.
    pub fn new(story: &'a StoryGraph, start: impl Into<String>) -> Self {
        Self::with_state(story, start, PlayerState::seeded())
    }

    /// Start a session from pre-set stats.
    pub fn with_state(
        story: &'a StoryGraph,
        start: impl Into<String>,
        state: PlayerState,
    ) -> Self {
        Self {
            story,
            state,
            current: start.into(),
            pending: Pending::None,
        }
    }

    /// Render the current node and report what to do next.
    ///
    /// Rendering is re-entered after every transition; calling `step` again
    /// before resolving a pending action renders the same node again, with
    /// availability recomputed.
    pub fn step(&mut self) -> StepResult {
        let Some(node) = self.story.get_node(&self.current) else {
            log::debug!("halt: unknown node '{}'", self.current);
            self.pending = Pending::None;
            return StepResult {
                view: None,
                next: NextAction::Halt,
                ending: Some(Ending::UnknownNode {
                    id: self.current.clone(),
                }),
            };
        };

        // Non-empty choices take precedence over a linear successor.
        if node.choices.is_empty() {
            let view = self.render(node).0;
            return match &node.next {
                Some(next_id) => {
                    self.pending = Pending::Advance(next_id.clone());
                    StepResult {
                        view: Some(view),
                        next: NextAction::WaitUser,
                        ending: None,
                    }
                }
                None => {
                    self.pending = Pending::None;
                    StepResult {
                        view: Some(view),
                        next: NextAction::Halt,
                        ending: Some(Ending::EndOfStory),
                    }
                }
            };
        }

        let (view, available) = self.render(node);
        if available.is_empty() {
            log::debug!("halt: no selectable choice at '{}'", node.id);
            self.pending = Pending::None;
            return StepResult {
                view: Some(view),
                next: NextAction::Halt,
                ending: Some(Ending::DeadEnd),
            };
        }

        self.pending = Pending::Choice(available);
        StepResult {
            view: Some(view),
            next: NextAction::WaitChoice,
            ending: None,
        }
    }

    /// Commit the player's selection, 1-based into the available list.
    ///
    /// Invalid selections leave the session untouched so the caller can
    /// re-prompt. The choice's target is not checked here; a dangling id
    /// surfaces as [`Ending::UnknownNode`] on the next [`Self::step`].
    pub fn choose(&mut self, selection: usize) -> Result<Vec<StatChange>, EngineError> {
        let Pending::Choice(available) = &self.pending else {
            return Err(EngineError::NoChoicePending);
        };
        if selection < 1 || selection > available.len() {
            return Err(EngineError::InvalidSelection {
                given: selection,
                max: available.len(),
            });
        }
        let index = available[selection - 1];
        let Some(node) = self.story.get_node(&self.current) else {
            // The graph is borrowed immutably, so the node rendered by the
            // last step is still there; this arm is unreachable in practice.
            self.pending = Pending::None;
            return Err(EngineError::NoChoicePending);
        };
        let choice = &node.choices[index];

        log::debug!("choice '{}' -> '{}'", choice.text, choice.next_id);
        let changes = self.state.apply_effects(&choice.effects);
        self.current = choice.next_id.clone();
        self.pending = Pending::None;
        Ok(changes)
    }

    /// Commit a pending linear transition. No effects apply on linear flow.
    pub fn advance(&mut self) -> Result<(), EngineError> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Advance(next_id) => {
                log::debug!("advance -> '{next_id}'");
                self.current = next_id;
                Ok(())
            }
            other => {
                self.pending = other;
                Err(EngineError::NoAdvancePending)
            }
        }
    }

    /// Id of the node the engine is currently at.
    pub fn current_node_id(&self) -> &str {
        &self.current
    }

    /// The session state. Stays valid and inspectable after any ending.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Consume the engine, keeping the session state.
    pub fn into_state(self) -> PlayerState {
        self.state
    }

    /// Build the view for `node` and the indices of its selectable choices.
    fn render(&self, node: &Node) -> (NodeView, Vec<usize>) {
        let mut available = Vec::new();
        let mut available_views = Vec::new();
        let mut locked = Vec::new();
        for (index, choice) in node.choices.iter().enumerate() {
            if self.state.meets_requirements(&choice.requirements) {
                available.push(index);
                available_views.push(ChoiceView {
                    text: choice.text.clone(),
                });
            } else {
                locked.push(LockedChoice {
                    text: choice.text.clone(),
                    unmet: self.state.unmet_requirements(&choice.requirements),
                });
            }
        }
        let view = NodeView {
            node_id: node.id.clone(),
            speaker: node.speaker.clone(),
            text: node.text.clone(),
            state: self.state.vars().clone(),
            available: available_views,
            locked,
        };
        (view, available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node::{Choice, Node};

    fn linear_story() -> StoryGraph {
        let mut graph = StoryGraph::new();
        graph.add_node(Node::new("one", "Narrator", "First.").with_next("two"));
        graph.add_node(Node::new("two", "Narrator", "Second."));
        graph
    }

    #[test]
    fn linear_flow_waits_then_advances_without_effects() {
        let story = linear_story();
        let mut engine = PlaybackEngine::new(&story, "one");

        let step = engine.step();
        assert_eq!(step.next, NextAction::WaitUser);
        assert_eq!(step.view.as_ref().unwrap().node_id, "one");

        let before = engine.state().clone();
        engine.advance().unwrap();
        assert_eq!(engine.state(), &before);

        let step = engine.step();
        assert_eq!(step.next, NextAction::Halt);
        assert_eq!(step.ending, Some(Ending::EndOfStory));
        assert_eq!(step.view.as_ref().unwrap().node_id, "two");
    }

    #[test]
    fn unknown_start_halts_with_diagnostic() {
        let story = StoryGraph::new();
        let mut engine = PlaybackEngine::new(&story, "missing");

        let step = engine.step();
        assert_eq!(step.next, NextAction::Halt);
        assert!(step.view.is_none());
        assert_eq!(
            step.ending,
            Some(Ending::UnknownNode {
                id: "missing".to_string()
            })
        );
        // The session state survives the failed traversal.
        assert_eq!(engine.state().get("hp"), 100);
    }

    #[test]
    fn choices_take_precedence_over_linear_successor() {
        let mut graph = StoryGraph::new();
        let mut fork = Node::new("fork", "Guide", "Pick a path.").with_next("ignored");
        fork.add_choice(Choice::new("Go on", "after"));
        graph.add_node(fork);
        graph.add_node(Node::new("after", "Guide", "Done."));

        let mut engine = PlaybackEngine::new(&graph, "fork");
        let step = engine.step();
        assert_eq!(step.next, NextAction::WaitChoice);

        engine.choose(1).unwrap();
        assert_eq!(engine.current_node_id(), "after");
    }

    #[test]
    fn all_choices_locked_is_a_dead_end() {
        let mut graph = StoryGraph::new();
        let mut gate = Node::new("gate", "Door", "A sealed door.");
        gate.add_choice(Choice::new("Open", "inside").require("keys", 1));
        graph.add_node(gate);

        let mut engine = PlaybackEngine::new(&graph, "gate");
        let step = engine.step();
        assert_eq!(step.next, NextAction::Halt);
        assert_eq!(step.ending, Some(Ending::DeadEnd));

        let view = step.view.unwrap();
        assert!(view.available.is_empty());
        assert_eq!(view.locked.len(), 1);
        assert_eq!(view.locked[0].unmet.get("keys"), Some(&1));
    }

    #[test]
    fn choose_without_pending_choice_is_an_error() {
        let story = linear_story();
        let mut engine = PlaybackEngine::new(&story, "one");
        engine.step();
        assert_eq!(engine.choose(1), Err(EngineError::NoChoicePending));
    }

    #[test]
    fn advance_without_pending_transition_is_an_error() {
        let mut graph = StoryGraph::new();
        let mut fork = Node::new("fork", "Guide", "Pick.");
        fork.add_choice(Choice::new("Go", "fork"));
        graph.add_node(fork);

        let mut engine = PlaybackEngine::new(&graph, "fork");
        engine.step();
        assert_eq!(engine.advance(), Err(EngineError::NoAdvancePending));
        // The pending choice is still live after the failed advance.
        assert!(engine.choose(1).is_ok());
    }
}
