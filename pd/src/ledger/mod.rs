//! Adaptation ledger
//!
//! Records a full pre-change snapshot before any approved adaptation
//! mutates a live plan, and guards rollback so each snapshot is handed out
//! at most once. The ledger never touches the plan itself; applying diffs
//! and restoring snapshots belong to the external collaborator.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{AdaptationIntent, AdaptationRecord, AdaptationStatus};

/// Errors from ledger operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Adaptation record not found: {0}")]
    NotFound(String),

    #[error("Adaptation {0} was already rolled back")]
    AlreadyRolledBack(String),

    #[error("Adaptation {0} was invalidated; there is nothing to roll back")]
    Invalidated(String),
}

/// In-memory adaptation ledger
///
/// Insertion order is preserved so per-plan listings read chronologically.
#[derive(Debug, Default)]
pub struct AdaptationLedger {
    records: HashMap<String, AdaptationRecord>,
    order: Vec<String>,
}

impl AdaptationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an adaptation strictly before its diff is applied
    ///
    /// `snapshot_before` must capture the plan state as it is right now;
    /// the returned record is what the collaborator references for a later
    /// rollback.
    pub fn record(
        &mut self,
        plan_id: impl Into<String>,
        user_id: impl Into<String>,
        intent: AdaptationIntent,
        params: Value,
        snapshot_before: Value,
    ) -> AdaptationRecord {
        let record = AdaptationRecord::new(plan_id, user_id, intent, params, snapshot_before);
        info!(id = %record.id, %intent, plan_id = %record.plan_id, "adaptation recorded");
        self.order.push(record.id.clone());
        self.records.insert(record.id.clone(), record.clone());
        record
    }

    /// Look up a record by id
    pub fn get(&self, record_id: &str) -> Option<&AdaptationRecord> {
        self.records.get(record_id)
    }

    /// Roll an adaptation back, returning the snapshot to restore
    ///
    /// Succeeds exactly once per record; a second call fails with
    /// `AlreadyRolledBack` and the snapshot is not handed out again.
    pub fn rollback(&mut self, record_id: &str) -> Result<Value, LedgerError> {
        let record = self
            .records
            .get_mut(record_id)
            .ok_or_else(|| LedgerError::NotFound(record_id.to_string()))?;

        match record.status {
            AdaptationStatus::RolledBack => {
                warn!(id = %record_id, "rollback refused, already rolled back");
                Err(LedgerError::AlreadyRolledBack(record_id.to_string()))
            }
            AdaptationStatus::Invalidated => {
                warn!(id = %record_id, "rollback refused, record invalidated");
                Err(LedgerError::Invalidated(record_id.to_string()))
            }
            AdaptationStatus::Applied => {
                record.status = AdaptationStatus::RolledBack;
                info!(id = %record_id, "adaptation rolled back");
                Ok(record.snapshot_before.clone())
            }
        }
    }

    /// Compensate a record whose diff application failed
    ///
    /// Keeps the ledger from referencing a change that never happened; an
    /// invalidated record can no longer be rolled back.
    pub fn invalidate(&mut self, record_id: &str) -> Result<(), LedgerError> {
        let record = self
            .records
            .get_mut(record_id)
            .ok_or_else(|| LedgerError::NotFound(record_id.to_string()))?;

        debug!(id = %record_id, status = ?record.status, "invalidating record");
        record.status = AdaptationStatus::Invalidated;
        Ok(())
    }

    /// Records for a plan in the order they were written
    pub fn records_for_plan(&self, plan_id: &str) -> Vec<&AdaptationRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .filter(|record| record.plan_id == plan_id)
            .collect()
    }

    /// Number of records in the ledger
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> Value {
        json!({"total_days": 14, "status": "active"})
    }

    #[test]
    fn test_record_captures_snapshot() {
        let mut ledger = AdaptationLedger::new();
        let record = ledger.record(
            "plan-1",
            "user-1",
            AdaptationIntent::ReduceDailyLoad,
            Value::Null,
            snapshot(),
        );

        assert_eq!(record.snapshot_before, snapshot());
        assert_eq!(record.status, AdaptationStatus::Applied);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_rollback_succeeds_once() {
        let mut ledger = AdaptationLedger::new();
        let record = ledger.record(
            "plan-1",
            "user-1",
            AdaptationIntent::LowerDifficulty,
            Value::Null,
            snapshot(),
        );

        let restored = ledger.rollback(&record.id).unwrap();
        assert_eq!(restored, snapshot());
        assert!(ledger.get(&record.id).unwrap().is_rolled_back());

        // second rollback must fail and hand nothing out
        let second = ledger.rollback(&record.id);
        assert_eq!(second, Err(LedgerError::AlreadyRolledBack(record.id.clone())));
    }

    #[test]
    fn test_rollback_unknown_record() {
        let mut ledger = AdaptationLedger::new();
        let result = ledger.rollback("missing");
        assert_eq!(result, Err(LedgerError::NotFound("missing".to_string())));
    }

    #[test]
    fn test_invalidated_record_cannot_roll_back() {
        let mut ledger = AdaptationLedger::new();
        let record = ledger.record(
            "plan-1",
            "user-1",
            AdaptationIntent::PausePlan,
            Value::Null,
            snapshot(),
        );

        ledger.invalidate(&record.id).unwrap();
        let result = ledger.rollback(&record.id);
        assert_eq!(result, Err(LedgerError::Invalidated(record.id.clone())));
    }

    #[test]
    fn test_records_for_plan_in_order() {
        let mut ledger = AdaptationLedger::new();
        let first = ledger.record(
            "plan-1",
            "user-1",
            AdaptationIntent::ReduceDailyLoad,
            Value::Null,
            snapshot(),
        );
        ledger.record(
            "plan-2",
            "user-1",
            AdaptationIntent::PausePlan,
            Value::Null,
            snapshot(),
        );
        let third = ledger.record(
            "plan-1",
            "user-1",
            AdaptationIntent::IncreaseDifficulty,
            Value::Null,
            snapshot(),
        );

        let for_plan: Vec<&str> = ledger
            .records_for_plan("plan-1")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(for_plan, vec![first.id.as_str(), third.id.as_str()]);
    }
}
