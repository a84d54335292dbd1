//! Adaptation domain types
//!
//! An adaptation is an approved change to a live plan. Every intent carries
//! metadata describing how it behaves; the ledger stores a pre-change
//! snapshot alongside each applied adaptation so it can be rolled back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::generate_id;

/// All supported adaptation intents
///
/// Values are shared across the agent tool schema, the ledger, and
/// eligibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdaptationIntent {
    ReduceDailyLoad,
    IncreaseDailyLoad,
    LowerDifficulty,
    IncreaseDifficulty,
    ExtendPlanDuration,
    ShortenPlanDuration,
    PausePlan,
    ResumePlan,
    ChangeMainCategory,
}

/// Grouping of adaptation intents for eligibility and analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdaptationCategory {
    LoadAdjustment,
    DifficultyAdjustment,
    DurationAdjustment,
    ExecutionState,
    FocusChange,
}

impl AdaptationIntent {
    /// All intents in declaration order
    pub const ALL: [AdaptationIntent; 9] = [
        Self::ReduceDailyLoad,
        Self::IncreaseDailyLoad,
        Self::LowerDifficulty,
        Self::IncreaseDifficulty,
        Self::ExtendPlanDuration,
        Self::ShortenPlanDuration,
        Self::PausePlan,
        Self::ResumePlan,
        Self::ChangeMainCategory,
    ];

    /// Category the intent belongs to
    pub fn category(self) -> AdaptationCategory {
        match self {
            Self::ReduceDailyLoad | Self::IncreaseDailyLoad => AdaptationCategory::LoadAdjustment,
            Self::LowerDifficulty | Self::IncreaseDifficulty => {
                AdaptationCategory::DifficultyAdjustment
            }
            Self::ExtendPlanDuration | Self::ShortenPlanDuration => {
                AdaptationCategory::DurationAdjustment
            }
            Self::PausePlan | Self::ResumePlan => AdaptationCategory::ExecutionState,
            Self::ChangeMainCategory => AdaptationCategory::FocusChange,
        }
    }

    /// Whether the intent needs caller-supplied parameters
    pub fn requires_params(self) -> bool {
        matches!(
            self,
            Self::ExtendPlanDuration | Self::ShortenPlanDuration | Self::ChangeMainCategory
        )
    }

    /// Whether the intent changes the plan's structure
    pub fn affects_structure(self) -> bool {
        !matches!(self, Self::PausePlan | Self::ResumePlan)
    }

    /// Whether the intent can be undone by a rollback
    pub fn is_reversible(self) -> bool {
        !matches!(
            self,
            Self::ExtendPlanDuration | Self::ShortenPlanDuration | Self::ChangeMainCategory
        )
    }

    /// Wire name of the intent
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReduceDailyLoad => "REDUCE_DAILY_LOAD",
            Self::IncreaseDailyLoad => "INCREASE_DAILY_LOAD",
            Self::LowerDifficulty => "LOWER_DIFFICULTY",
            Self::IncreaseDifficulty => "INCREASE_DIFFICULTY",
            Self::ExtendPlanDuration => "EXTEND_PLAN_DURATION",
            Self::ShortenPlanDuration => "SHORTEN_PLAN_DURATION",
            Self::PausePlan => "PAUSE_PLAN",
            Self::ResumePlan => "RESUME_PLAN",
            Self::ChangeMainCategory => "CHANGE_MAIN_CATEGORY",
        }
    }
}

impl std::fmt::Display for AdaptationIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationStatus {
    /// Snapshot written; the external collaborator applied (or is applying)
    /// the diff
    #[default]
    Applied,
    /// Rolled back exactly once; the snapshot was handed out for restore
    RolledBack,
    /// Diff application failed after the snapshot was written; the record is
    /// compensated and must not be rolled back
    Invalidated,
}

/// A recorded plan mutation with its pre-change snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationRecord {
    /// Unique identifier (e.g. `019430-adapt-reduce-daily-load`)
    pub id: String,

    /// Plan the adaptation applies to
    pub plan_id: String,

    /// Owning user
    pub user_id: String,

    /// What the adaptation does
    pub intent: AdaptationIntent,

    /// Intent grouping, derived at record time
    pub category: AdaptationCategory,

    /// Caller-supplied parameters for the diff
    pub params: Value,

    /// Full prior plan state, captured strictly before the diff is applied
    pub snapshot_before: Value,

    /// When the record was written (UTC)
    pub applied_at: DateTime<Utc>,

    /// Current lifecycle status
    pub status: AdaptationStatus,
}

impl AdaptationRecord {
    /// Create a new record with a generated ID and `Applied` status
    pub fn new(
        plan_id: impl Into<String>,
        user_id: impl Into<String>,
        intent: AdaptationIntent,
        params: Value,
        snapshot_before: Value,
    ) -> Self {
        Self {
            id: generate_id("adapt", intent.as_str()),
            plan_id: plan_id.into(),
            user_id: user_id.into(),
            intent,
            category: intent.category(),
            params,
            snapshot_before,
            applied_at: Utc::now(),
            status: AdaptationStatus::Applied,
        }
    }

    /// Whether the record has been rolled back
    pub fn is_rolled_back(&self) -> bool {
        self.status == AdaptationStatus::RolledBack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_wire_format() {
        let json = serde_json::to_string(&AdaptationIntent::ReduceDailyLoad).unwrap();
        assert_eq!(json, "\"REDUCE_DAILY_LOAD\"");

        let parsed: AdaptationIntent = serde_json::from_str("\"PAUSE_PLAN\"").unwrap();
        assert_eq!(parsed, AdaptationIntent::PausePlan);
    }

    #[test]
    fn test_intent_metadata() {
        assert_eq!(
            AdaptationIntent::ReduceDailyLoad.category(),
            AdaptationCategory::LoadAdjustment
        );
        assert!(!AdaptationIntent::ReduceDailyLoad.requires_params());
        assert!(AdaptationIntent::ReduceDailyLoad.affects_structure());
        assert!(AdaptationIntent::ReduceDailyLoad.is_reversible());

        assert!(AdaptationIntent::ExtendPlanDuration.requires_params());
        assert!(!AdaptationIntent::ExtendPlanDuration.is_reversible());

        assert!(!AdaptationIntent::PausePlan.affects_structure());
        assert_eq!(
            AdaptationIntent::PausePlan.category(),
            AdaptationCategory::ExecutionState
        );
    }

    #[test]
    fn test_every_intent_has_consistent_structure_flag() {
        for intent in AdaptationIntent::ALL {
            // execution-state intents are exactly the non-structural ones
            assert_eq!(
                intent.category() == AdaptationCategory::ExecutionState,
                !intent.affects_structure()
            );
        }
    }

    #[test]
    fn test_record_new() {
        let record = AdaptationRecord::new(
            "plan-1",
            "user-1",
            AdaptationIntent::LowerDifficulty,
            Value::Null,
            serde_json::json!({"days": 14}),
        );

        assert!(record.id.contains("-adapt-"));
        assert_eq!(record.category, AdaptationCategory::DifficultyAdjustment);
        assert_eq!(record.status, AdaptationStatus::Applied);
        assert!(!record.is_rolled_back());
    }
}
