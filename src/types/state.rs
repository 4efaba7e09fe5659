//! Session-scoped player state

use crate::types::node::StatMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The numeric variables tracked across one playthrough.
///
/// Reads of absent variables yield 0, and applying an effect to an unknown
/// name creates it at 0 before adding the delta. One `PlayerState` belongs to
/// one session; the story definition never owns it, so several playthroughs
/// can share a graph without cross-talk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    vars: BTreeMap<String, i64>,
}

impl PlayerState {
    /// The stats every new session starts with.
    pub fn seeded() -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("gold".to_string(), 0);
        vars.insert("honor".to_string(), 0);
        vars.insert("hp".to_string(), 100);
        Self { vars }
    }

    /// A state with no variables at all. Reads still default to 0.
    pub fn empty() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Current value of a variable, 0 if it was never set.
    pub fn get(&self, name: &str) -> i64 {
        self.vars.get(name).copied().unwrap_or(0)
    }

    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.vars.insert(name.into(), value);
    }

    /// True iff every `(variable, threshold)` pair is satisfied.
    ///
    /// An empty requirement map always passes. Stops at the first unmet pair.
    pub fn meets_requirements(&self, requirements: &StatMap) -> bool {
        requirements
            .iter()
            .all(|(name, threshold)| self.get(name) >= *threshold)
    }

    /// The subset of `requirements` the state does not currently satisfy.
    pub fn unmet_requirements(&self, requirements: &StatMap) -> StatMap {
        requirements
            .iter()
            .filter(|(name, threshold)| self.get(name) < **threshold)
            .map(|(name, threshold)| (name.clone(), *threshold))
            .collect()
    }

    /// Apply every delta in `effects`, creating unknown variables at 0.
    ///
    /// Always processes the full map. Returns one record per entry so front
    /// ends can report what changed.
    pub fn apply_effects(&mut self, effects: &StatMap) -> Vec<StatChange> {
        let mut changes = Vec::with_capacity(effects.len());
        for (name, delta) in effects {
            let value = self.get(name) + delta;
            self.vars.insert(name.clone(), value);
            log::debug!("effect: {name} {delta:+} -> {value}");
            changes.push(StatChange {
                name: name.clone(),
                delta: *delta,
                value,
            });
        }
        changes
    }

    /// All variables, sorted by name.
    pub fn vars(&self) -> &BTreeMap<String, i64> {
        &self.vars
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Record of one applied effect delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatChange {
    pub name: String,
    pub delta: i64,
    /// Value of the variable after the delta.
    pub value: i64,
}
