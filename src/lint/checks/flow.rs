//! Flow analysis: conflicting successor kinds and reachability

use crate::graph::StoryGraph;
use crate::lint::{LintIssue, LintLevel, LintResult};
use std::collections::HashSet;

/// Check flow properties of the graph.
pub fn check(story: &StoryGraph, result: &mut LintResult) {
    check_conflicting_successors(story, result);
    check_reachability(story, result);
}

fn check_conflicting_successors(story: &StoryGraph, result: &mut LintResult) {
    for node in story.iter() {
        if node.next.is_some() && node.has_choices() {
            result.add_issue(LintIssue {
                level: LintLevel::Warning,
                message: format!(
                    "node '{}' has both a linear successor and choices; choices take precedence",
                    node.id
                ),
                node_id: Some(node.id.clone()),
                category: "flow".to_string(),
            });
        }
    }
}

fn check_reachability(story: &StoryGraph, result: &mut LintResult) {
    let Some(start) = story.first_node_id() else {
        return;
    };

    let mut visited = HashSet::new();
    let mut queue = vec![start.to_string()];
    while let Some(id) = queue.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let Some(node) = story.get_node(&id) else {
            continue;
        };
        // Choices shadow the linear successor, but both edge kinds count for
        // reachability: authoring may toggle between them.
        if let Some(next) = &node.next {
            queue.push(next.clone());
        }
        for choice in &node.choices {
            queue.push(choice.next_id.clone());
        }
    }

    for node in story.iter() {
        if !visited.contains(&node.id) {
            result.add_issue(LintIssue {
                level: LintLevel::Warning,
                message: format!("node '{}' is unreachable from '{}'", node.id, start),
                node_id: Some(node.id.clone()),
                category: "flow".to_string(),
            });
        }
    }
}
