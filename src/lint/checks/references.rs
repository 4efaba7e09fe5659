//! Reference integrity checking implementation

use crate::graph::StoryGraph;
use crate::lint::{LintIssue, LintLevel, LintResult};

/// Check that every edge target resolves to an existing node.
pub fn check(story: &StoryGraph, result: &mut LintResult) {
    for node in story.iter() {
        if let Some(next) = &node.next
            && !story.contains(next)
        {
            result.add_issue(LintIssue {
                level: LintLevel::Error,
                message: format!("node '{}' links to unknown node '{}'", node.id, next),
                node_id: Some(node.id.clone()),
                category: "references".to_string(),
            });
        }

        for choice in &node.choices {
            if !story.contains(&choice.next_id) {
                result.add_issue(LintIssue {
                    level: LintLevel::Error,
                    message: format!(
                        "choice '{}' on node '{}' targets unknown node '{}'",
                        choice.text, node.id, choice.next_id
                    ),
                    node_id: Some(node.id.clone()),
                    category: "references".to_string(),
                });
            }
        }
    }
}
