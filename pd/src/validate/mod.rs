//! Draft structural validation
//!
//! Final certification of a completed draft against the slot policy. A
//! violation here means the builder (or a caller tampering with a draft) has
//! a defect; it is never a recoverable user condition.

use std::collections::HashMap;

use contentlib::Catalog;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Category, Draft, PlanParameters, SlotType, TimeSlot};
use crate::policy;

/// Default tolerance for the category-distribution check, as a fraction of
/// the total step count
pub const DEFAULT_CATEGORY_TOLERANCE: f64 = 0.25;

/// Structural defects in a finished draft
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftStructureError {
    #[error("Draft validation requires complete parameters")]
    IncompleteParameters,

    #[error("Draft contains no steps")]
    EmptyDraft,

    #[error("Draft covers {found} days, expected {expected}")]
    TotalDaysMismatch { expected: u32, found: u32 },

    #[error("Draft carries {found} steps, expected {expected}")]
    TotalStepMismatch { expected: usize, found: usize },

    #[error("Day {day} has {found} steps, expected {expected}")]
    DaySlotMismatch {
        day: u32,
        expected: usize,
        found: usize,
    },

    #[error("Day {day} slot {slot_index} is {found}, expected {expected}")]
    SlotTypeMismatch {
        day: u32,
        slot_index: u32,
        expected: SlotType,
        found: SlotType,
    },

    #[error("Day {day} slot {slot_index} difficulty {difficulty} exceeds ceiling {ceiling}")]
    DifficultyExceeded {
        day: u32,
        slot_index: u32,
        difficulty: u8,
        ceiling: u8,
    },

    #[error("Day {day} schedules {time_slot} outside the preferred time slots")]
    TimeSlotOutsidePreferred { day: u32, time_slot: TimeSlot },

    #[error("Exercise {exercise_id} reused on day {day} within its {cooldown_days}-day cooldown")]
    CooldownViolated {
        exercise_id: String,
        day: u32,
        cooldown_days: u32,
    },

    #[error("Draft references unknown exercise {0}")]
    UnknownExercise(String),

    #[error("Category {category} has {found} steps, target {target} (tolerance {tolerance})")]
    CategoryImbalance {
        category: Category,
        found: usize,
        target: usize,
        tolerance: usize,
    },
}

/// Certification result for a structurally sound draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftSummary {
    pub is_valid: bool,
    pub total_days: u32,
    pub total_steps: u32,
}

/// Validate a completed draft against the policy for its parameters
pub fn validate(
    draft: &Draft,
    params: &PlanParameters,
    catalog: &Catalog,
    category_tolerance: f64,
) -> Result<DraftSummary, DraftStructureError> {
    let (Some(duration), Some(focus), Some(load), Some(preferred)) = (
        params.duration,
        params.focus,
        params.load,
        params.preferred_time_slots.as_deref(),
    ) else {
        return Err(DraftStructureError::IncompleteParameters);
    };

    if draft.steps.is_empty() {
        return Err(DraftStructureError::EmptyDraft);
    }

    let expected_days = policy::days_for(duration);
    if draft.total_days != expected_days {
        return Err(DraftStructureError::TotalDaysMismatch {
            expected: expected_days,
            found: draft.total_days,
        });
    }

    let structure = policy::slot_structure(load);
    let expected_steps = expected_days as usize * structure.len();
    if draft.steps.len() != expected_steps || draft.total_steps as usize != expected_steps {
        return Err(DraftStructureError::TotalStepMismatch {
            expected: expected_steps,
            found: draft.steps.len(),
        });
    }

    let mut last_used: HashMap<&str, u32> = HashMap::new();
    let mut category_counts: HashMap<Category, usize> = HashMap::new();

    for day in 1..=expected_days {
        let day_steps: Vec<_> = draft.steps_for_day(day).collect();
        if day_steps.len() != structure.len() {
            return Err(DraftStructureError::DaySlotMismatch {
                day,
                expected: structure.len(),
                found: day_steps.len(),
            });
        }

        let ceiling = policy::max_difficulty_for_week(policy::week_of_day(day));

        for (slot_index, step) in day_steps.iter().enumerate() {
            let expected_type = structure[slot_index];
            if step.slot_type != expected_type || step.slot_index != slot_index as u32 {
                return Err(DraftStructureError::SlotTypeMismatch {
                    day,
                    slot_index: slot_index as u32,
                    expected: expected_type,
                    found: step.slot_type,
                });
            }

            if step.difficulty > ceiling {
                return Err(DraftStructureError::DifficultyExceeded {
                    day,
                    slot_index: step.slot_index,
                    difficulty: step.difficulty,
                    ceiling,
                });
            }

            if !preferred.contains(&step.time_slot) {
                return Err(DraftStructureError::TimeSlotOutsidePreferred {
                    day,
                    time_slot: step.time_slot,
                });
            }

            let item = catalog
                .get(&step.exercise_id)
                .ok_or_else(|| DraftStructureError::UnknownExercise(step.exercise_id.clone()))?;
            if let Some(&last) = last_used.get(step.exercise_id.as_str()) {
                if day - last <= item.cooldown_days {
                    return Err(DraftStructureError::CooldownViolated {
                        exercise_id: step.exercise_id.clone(),
                        day,
                        cooldown_days: item.cooldown_days,
                    });
                }
            }
            last_used.insert(step.exercise_id.as_str(), day);

            *category_counts.entry(step.category).or_insert(0) += 1;
        }
    }

    // fallback tiers may drift from the requested weighting; the drift must
    // stay within the configured tolerance of the target apportionment
    let tolerance = (category_tolerance * expected_steps as f64).ceil() as usize;
    let targets: HashMap<Category, usize> =
        policy::category_quotas(focus, expected_steps).into_iter().collect();
    for category in Category::ALL {
        let target = targets.get(&category).copied().unwrap_or(0);
        let found = category_counts.get(&category).copied().unwrap_or(0);
        if found.abs_diff(target) > tolerance {
            return Err(DraftStructureError::CategoryImbalance {
                category,
                found,
                target,
                tolerance,
            });
        }
    }

    debug!(
        total_days = expected_days,
        total_steps = expected_steps,
        "draft certified"
    );
    Ok(DraftSummary {
        is_valid: true,
        total_days: expected_days,
        total_steps: expected_steps as u32,
    })
}
