//! Persisted story form: document conversion and save/load
//!
//! The canonical on-disk encoding is pretty-printed JSON, keyed by node id,
//! human-diffable and editable by hand between tool runs. The player state is
//! a runtime concept and is never part of the document; loading re-seeds it.

use crate::graph::StoryGraph;
use crate::types::node::{Choice, Node};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

pub mod repositories;

/// Failure modes for persisted stories.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The resource does not exist. Recoverable: callers may start fresh.
    #[error("story not found: {path}")]
    NotFound { path: String },

    /// The document exists but is not a valid story form.
    #[error("malformed story document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend cannot perform this operation.
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// On-disk record for one node. Field names match the original story files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct PersistedNode {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Speaker", default)]
    speaker: String,
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "NextNode", default)]
    next: Option<String>,
    #[serde(rename = "Choices", default)]
    choices: Vec<Choice>,
}

/// Convert a graph to its canonical document form.
///
/// Deterministic for identical graph content: node keys follow graph
/// insertion order, choice lists keep declaration order.
pub fn to_document(story: &StoryGraph) -> Value {
    let mut doc = Map::new();
    for node in story.iter() {
        doc.insert(
            node.id.clone(),
            json!({
                "ID": node.id,
                "Speaker": node.speaker,
                "Text": node.text,
                "NextNode": node.next,
                "Choices": node.choices,
            }),
        );
    }
    Value::Object(doc)
}

/// Parse a document back into a graph.
///
/// Nodes and choices are reconstructed exactly; missing optional fields
/// default to absent/empty. Node insertion order follows document order, so
/// the first declared node stays the default start.
pub fn from_document(json: &str) -> Result<StoryGraph, StorageError> {
    let doc: Map<String, Value> = serde_json::from_str(json)?;
    let mut story = StoryGraph::new();
    for (key, value) in doc {
        let record: PersistedNode = serde_json::from_value(value)?;
        // Old documents may omit the redundant ID field; the map key wins.
        let id = if record.id.is_empty() { key } else { record.id };
        let mut node = Node::new(id, record.speaker, record.text);
        node.next = record.next;
        node.choices = record.choices;
        story.add_node(node);
    }
    Ok(story)
}

/// Serialize a graph to pretty-printed JSON bytes.
pub fn save(story: &StoryGraph) -> Result<Vec<u8>, StorageError> {
    let json = serde_json::to_string_pretty(&to_document(story))?;
    Ok(json.into_bytes())
}

/// Deserialize a graph from JSON bytes.
pub fn load(bytes: &[u8]) -> Result<StoryGraph, StorageError> {
    let json = std::str::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    from_document(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node::Choice;

    fn sample_story() -> StoryGraph {
        let mut story = StoryGraph::new();

        let mut shop = Node::new("shop_01", "Merchant", "That sword costs 10 Gold.");
        shop.add_choice(
            Choice::new("Buy the Sword", "buy_success")
                .require("gold", 10)
                .effect("gold", -10)
                .effect("damage", 5),
        );
        shop.add_choice(Choice::new("Leave shop", "buy_fail"));
        story.add_node(shop);

        story.add_node(Node::new("buy_success", "Hero", "Here is the money.").with_next("shop_01"));
        story.add_node(Node::new("buy_fail", "Merchant", "Come back with coin!"));
        story
    }

    #[test]
    fn save_then_load_restores_the_graph() {
        let original = sample_story();

        let bytes = save(&original).unwrap();
        let restored = load(&bytes).unwrap();

        assert_eq!(restored, original);
        let ids: Vec<&str> = restored.node_ids().collect();
        assert_eq!(ids, vec!["shop_01", "buy_success", "buy_fail"]);
    }

    #[test]
    fn document_keys_follow_insertion_order() {
        let story = sample_story();
        let doc = to_document(&story);

        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["shop_01", "buy_success", "buy_fail"]);
    }

    #[test]
    fn document_output_is_deterministic() {
        let story = sample_story();
        let first = serde_json::to_string(&to_document(&story)).unwrap();
        let second = serde_json::to_string(&to_document(&story)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let json = r#"{
            "intro": {
                "ID": "intro",
                "Speaker": "Narrator",
                "Text": "Hello.",
                "Choices": [
                    { "text": "Onward", "next_id": "next_scene" }
                ]
            }
        }"#;

        let story = from_document(json).unwrap();
        let node = story.get_node("intro").unwrap();
        assert!(node.next.is_none());
        assert!(node.choices[0].effects.is_empty());
        assert!(node.choices[0].requirements.is_empty());
    }

    #[test]
    fn record_without_id_field_takes_the_map_key() {
        let json = r#"{
            "intro": { "Speaker": "Narrator", "Text": "Hello." }
        }"#;

        let story = from_document(json).unwrap();
        assert_eq!(story.get_node("intro").unwrap().id, "intro");
    }

    #[test]
    fn save_empty_graph() {
        let story = StoryGraph::new();
        let bytes = save(&story).unwrap();
        let restored = load(&bytes).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn load_invalid_data_is_malformed() {
        let result = load(b"not json at all");
        assert!(matches!(result, Err(StorageError::Malformed(_))));
    }
}
