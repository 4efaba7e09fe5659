//! Lint module for story graph integrity checking
//!
//! Traversal never validates edge targets up front; this separate pass is
//! what authoring and visualization surfaces run instead:
//! - Reference integrity (dangling linear successors and choice targets)
//! - Flow analysis (conflicting successor kinds, unreachable nodes)

use crate::graph::StoryGraph;
use serde::{Deserialize, Serialize};

pub mod checks;
pub mod config;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: must be fixed before the story can be played through
    Error,
    /// Warning: should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

/// A lint issue found in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Node the issue was found on, if any
    pub node_id: Option<String>,
    /// Category of the issue
    pub category: String,
}

/// Result of linting a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintResult {
    /// Issues found
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            error_count: 0,
            warning_count: 0,
            info_count: 0,
        }
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Default for LintResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Lint a graph with default configuration
pub fn lint(story: &StoryGraph) -> LintResult {
    let config = config::LintConfig::default();
    lint_with_config(story, &config)
}

/// Lint a graph with custom configuration
pub fn lint_with_config(story: &StoryGraph, config: &config::LintConfig) -> LintResult {
    let mut result = LintResult::new();

    if config.references.enabled {
        checks::references::check(story, &mut result);
    }

    if config.flow.enabled {
        checks::flow::check(story, &mut result);
    }

    result
}
