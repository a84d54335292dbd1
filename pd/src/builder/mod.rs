//! Draft composition engine
//!
//! Orchestrates policy, selection, and scheduling across every day and slot
//! of a plan. The builder is pure: it reads catalog and usage snapshots,
//! commits nothing, and either returns a fully certified draft or fails
//! without side effects. Identical inputs always produce identical drafts.

mod quota;

use contentlib::{Catalog, ContentItem};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{
    Draft, DraftStep, Duration, Focus, Load, PlanParameters, SlotType, TimeSlot, UsageHistory,
};
use crate::policy;
use crate::schedule;
use crate::selector::{self, CandidateFilter, SeedKey};
use crate::validate::{self, DEFAULT_CATEGORY_TOLERANCE, DraftStructureError};

use quota::CategoryQuotas;

/// Errors from a draft build
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The caller handed over parameters that never passed the gate; this is
    /// a contract breach, not a user error
    #[error("Plan parameters violate the slot policy: {0}")]
    Precondition(String),

    /// The catalog has no eligible item for a slot, even at the loosest tier
    #[error("No eligible exercise for day {day}, slot {slot_index} ({slot_type})")]
    SelectionExhausted {
        day: u32,
        slot_index: u32,
        slot_type: SlotType,
    },

    /// The finished draft failed structural certification
    #[error(transparent)]
    Structure(#[from] DraftStructureError),
}

/// Deterministic draft builder over a catalog snapshot
pub struct DraftBuilder<'a> {
    catalog: &'a Catalog,
    category_tolerance: f64,
}

impl<'a> DraftBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            category_tolerance: DEFAULT_CATEGORY_TOLERANCE,
        }
    }

    /// Override the validator's category tolerance
    pub fn with_category_tolerance(mut self, tolerance: f64) -> Self {
        self.category_tolerance = tolerance;
        self
    }

    /// Build a complete draft for a user
    ///
    /// `usage` is the user's cooldown history going into the build; it is
    /// not mutated. The caller records the draft's own usage only after the
    /// build succeeds.
    pub fn build(
        &self,
        user_id: &str,
        params: &PlanParameters,
        usage: &UsageHistory,
    ) -> Result<Draft, BuildError> {
        let (duration, focus, load, preferred) = Self::check_preconditions(params)?;

        let total_days = policy::days_for(duration);
        let structure = policy::slot_structure(load);
        let total_slots = total_days as usize * structure.len();

        let mut quotas = CategoryQuotas::new(focus, total_slots);
        let mut last_used = usage.clone();
        let mut steps = Vec::with_capacity(total_slots);

        debug!(%user_id, %duration, %focus, %load, total_days, "building draft");

        for day_index in 0..total_days {
            let day_number = day_index + 1;
            let ceiling = policy::max_difficulty_for_week(policy::week_of_day(day_number));
            let mut used_today = Vec::with_capacity(structure.len());

            for (slot_index, &slot_type) in structure.iter().enumerate() {
                let category = quotas.take_next();

                let pool: Vec<&ContentItem> = self
                    .catalog
                    .active()
                    .filter(|item| {
                        !last_used.in_cooldown(&item.id, i64::from(day_number), item.cooldown_days)
                    })
                    .collect();

                let filter = CandidateFilter {
                    preferred_category: category,
                    slot_type,
                    max_difficulty: ceiling,
                };
                let seed_key = SeedKey::new(user_id, day_index, slot_index as u32);

                let Some(item) = selector::select_with_fallback(&pool, &filter, &seed_key) else {
                    return Err(BuildError::SelectionExhausted {
                        day: day_number,
                        slot_index: slot_index as u32,
                        slot_type,
                    });
                };

                let Some(time_slot) = schedule::assign(slot_type, preferred, &used_today) else {
                    return Err(BuildError::Precondition(
                        "preferred time slots are empty".to_string(),
                    ));
                };
                used_today.push(time_slot);

                steps.push(DraftStep {
                    day_number,
                    slot_index: slot_index as u32,
                    slot_type,
                    exercise_id: item.id.clone(),
                    exercise_name: item.name.clone(),
                    category: item.category,
                    difficulty: item.difficulty,
                    time_slot,
                });

                // in-build bookkeeping so later days respect this pick
                last_used.record(item.id.clone(), i64::from(day_number));
            }
        }

        let draft = Draft {
            total_days,
            total_steps: steps.len() as u32,
            is_valid: false,
            steps,
        };

        let summary = validate::validate(&draft, params, self.catalog, self.category_tolerance)?;

        info!(
            %user_id,
            total_days = summary.total_days,
            total_steps = summary.total_steps,
            "draft built"
        );
        Ok(Draft {
            is_valid: summary.is_valid,
            ..draft
        })
    }

    /// Independent re-check of what the gate already enforced
    fn check_preconditions(
        params: &PlanParameters,
    ) -> Result<(Duration, Focus, Load, &[TimeSlot]), BuildError> {
        let missing = params.missing();
        if !missing.is_empty() {
            return Err(BuildError::Precondition(format!(
                "missing parameters: {}",
                missing.join(", ")
            )));
        }
        let (Some(duration), Some(focus), Some(load)) =
            (params.duration, params.focus, params.load)
        else {
            return Err(BuildError::Precondition("missing parameters".to_string()));
        };

        let expected = policy::expected_slot_count(load);
        let preferred = params.preferred_time_slots.as_deref().unwrap_or_default();
        if preferred.len() != expected {
            return Err(BuildError::Precondition(format!(
                "load {} expects {} preferred time slots, found {}",
                load,
                expected,
                preferred.len()
            )));
        }

        Ok((duration, focus, load, preferred))
    }
}
