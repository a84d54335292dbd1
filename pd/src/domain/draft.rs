//! Draft domain types
//!
//! A Draft is the generated, not-yet-approved day-by-day exercise sequence.
//! It is produced atomically by the builder and certified by the validator;
//! steps are never mutated after creation.

use contentlib::{Category, PriorityTier};
use serde::{Deserialize, Serialize};

use super::params::TimeSlot;

/// Type of a daily slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotType {
    /// Anchor exercise of the day
    Core,
    /// Accompanying exercise
    Support,
    /// Wind-down exercise closing intensive days
    Rest,
}

impl SlotType {
    /// The catalog tier this slot type draws from
    pub fn tier(self) -> PriorityTier {
        match self {
            Self::Core => PriorityTier::Core,
            Self::Support => PriorityTier::Support,
            Self::Rest => PriorityTier::Rest,
        }
    }
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "CORE"),
            Self::Support => write!(f, "SUPPORT"),
            Self::Rest => write!(f, "REST"),
        }
    }
}

/// A single scheduled exercise within a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftStep {
    /// Day the step belongs to (1-based)
    pub day_number: u32,

    /// Position within the day (0-based)
    pub slot_index: u32,

    /// Slot type the step fills
    pub slot_type: SlotType,

    /// Catalog id of the chosen exercise
    pub exercise_id: String,

    /// Catalog name of the chosen exercise
    pub exercise_name: String,

    /// Category of the chosen exercise
    pub category: Category,

    /// Difficulty of the chosen exercise
    pub difficulty: u8,

    /// Time-of-day bucket the step is scheduled into
    pub time_slot: TimeSlot,
}

/// A complete plan draft
///
/// Steps are ordered by day then slot index. Drafts carry no random
/// identifier so that identical inputs yield bit-identical drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// Number of days covered
    pub total_days: u32,

    /// Number of steps across all days
    pub total_steps: u32,

    /// Whether the draft passed structural validation
    pub is_valid: bool,

    /// All steps, ordered by (day_number, slot_index)
    pub steps: Vec<DraftStep>,
}

impl Draft {
    /// Steps scheduled for a given day (1-based)
    pub fn steps_for_day(&self, day_number: u32) -> impl Iterator<Item = &DraftStep> {
        self.steps.iter().filter(move |s| s.day_number == day_number)
    }

    /// Distinct exercise ids used across the draft
    pub fn exercise_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.steps.iter().map(|s| s.exercise_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
