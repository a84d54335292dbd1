//! Usage bookkeeping for cooldown filtering
//!
//! Tracks, per exercise, the last day it was scheduled for a user. Read
//! during candidate filtering; written back only after a successful build.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::draft::Draft;

/// Last-used day per exercise on the plan's day axis
///
/// Days are 1-based inside a plan; history imported from a previous horizon
/// may carry day numbers at or below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageHistory {
    last_used: HashMap<String, i64>,
}

impl UsageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a use of an exercise on the given day
    ///
    /// Keeps the latest day if the exercise was already recorded.
    pub fn record(&mut self, exercise_id: impl Into<String>, day: i64) {
        let exercise_id = exercise_id.into();
        self.last_used
            .entry(exercise_id)
            .and_modify(|last| *last = (*last).max(day))
            .or_insert(day);
    }

    /// Last day the exercise was used, if ever
    pub fn last_used(&self, exercise_id: &str) -> Option<i64> {
        self.last_used.get(exercise_id).copied()
    }

    /// Whether the exercise is still cooling down on `current_day`
    ///
    /// An exercise with `cooldown_days = n` needs a gap of more than n days
    /// since its last use; `n = 0` only blocks same-day reuse.
    pub fn in_cooldown(&self, exercise_id: &str, current_day: i64, cooldown_days: u32) -> bool {
        match self.last_used(exercise_id) {
            Some(last) => current_day - last <= i64::from(cooldown_days),
            None => false,
        }
    }

    /// Fold a successfully built draft into the history
    pub fn absorb_draft(&mut self, draft: &Draft) {
        for step in &draft.steps {
            self.record(step.exercise_id.clone(), i64::from(step.day_number));
        }
    }

    /// Number of tracked exercises
    pub fn len(&self) -> usize {
        self.last_used.len()
    }

    /// Whether no uses are tracked
    pub fn is_empty(&self) -> bool {
        self.last_used.is_empty()
    }
}
