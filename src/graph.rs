//! The story graph: owns every node, keyed by id

use crate::types::node::Node;
use std::collections::HashMap;

/// The full set of dialogue nodes for one story.
///
/// Lookup is by id. Enumeration follows insertion order, which also defines
/// the default starting node for stories loaded from disk. Inserting under an
/// existing id overwrites the node (authoring tools rely on
/// overwrite-as-update) and keeps its original position.
///
/// The graph is pure story definition: session state lives in
/// [`crate::types::PlayerState`], one per playthrough.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryGraph {
    nodes: HashMap<String, Node>,
    order: Vec<String>,
}

impl StoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node`, replacing any node with the same id.
    ///
    /// An overwrite is a warning, not an error: it is logged and the
    /// displaced node is returned so callers can surface it their own way.
    pub fn add_node(&mut self, node: Node) -> Option<Node> {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id.clone());
        }
        let displaced = self.nodes.insert(node.id.clone(), node);
        if let Some(previous) = &displaced {
            log::warn!("overwriting node '{}'", previous.id);
        }
        displaced
    }

    /// Pure lookup. Absent is a valid, non-error outcome.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The first node ever inserted; the default playback start for loaded
    /// stories.
    pub fn first_node_id(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
