//! Slot policy: pure lookups behind plan composition
//!
//! Everything here is a stateless function of the plan parameters. The gate
//! validates against these tables, the builder composes with them, and the
//! validator re-checks finished drafts against them.

mod difficulty;
mod slots;
mod weighting;

pub use difficulty::{max_difficulty_for_week, week_of_day};
pub use slots::{
    INTENSIVE_SLOTS, canonical_slots, days_for, expected_slot_count, slot_structure, slots_by_day,
};
pub use weighting::{category_quotas, category_weights};
