//! Parameter gate
//!
//! The single entry point through which proposed parameter deltas reach
//! stored per-user state. Updates are validated against the slot policy and
//! applied all-or-nothing: a rejected update leaves the known parameters
//! untouched, and an accepted one can never produce a stored state that
//! violates the policy.

mod signals;

pub use signals::{ConversationState, SignalError, TransitionSignal, apply_signal};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Duration, Focus, Load, PlanParameters, TimeSlot};
use crate::policy;

/// A proposed parameter delta, already extracted into typed fields
///
/// Free text never reaches this layer; the conversational agent decodes its
/// proposals into this closed shape at the boundary. Unknown fields are
/// rejected by serde, not coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterUpdate {
    #[serde(default)]
    pub duration: Option<Duration>,

    #[serde(default)]
    pub focus: Option<Focus>,

    #[serde(default)]
    pub load: Option<Load>,

    #[serde(default)]
    pub preferred_time_slots: Option<Vec<TimeSlot>>,
}

impl ParameterUpdate {
    /// Whether the update proposes no changes at all
    pub fn is_empty(&self) -> bool {
        self.duration.is_none()
            && self.focus.is_none()
            && self.load.is_none()
            && self.preferred_time_slots.is_none()
    }
}

/// Recoverable gate rejections, surfaced to the user as correction prompts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Missing base parameter: {0}")]
    MissingBaseParameter(&'static str),

    #[error("Expected {expected} preferred time slots for load {load}, got {got}")]
    SlotCountMismatch {
        load: Load,
        expected: usize,
        got: usize,
    },
}

/// Result of applying a parameter update
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// The update was committed
    Accepted {
        /// The new parameter state to persist
        parameters: PlanParameters,
        /// True iff all pillars are set and the slot set fits the load
        ready_for_confirmation: bool,
        /// Present when the gate adjusted something on the user's behalf
        correction: Option<String>,
    },
    /// The update was refused; stored parameters are untouched
    Rejected {
        reason: GateError,
        /// Short user-facing correction text
        correction: String,
    },
}

impl GateOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The committed parameters, if the update was accepted
    pub fn parameters(&self) -> Option<&PlanParameters> {
        match self {
            Self::Accepted { parameters, .. } => Some(parameters),
            Self::Rejected { .. } => None,
        }
    }
}

/// The plan-parameter validation gate
pub struct ParameterGate;

impl ParameterGate {
    /// Validate a proposed update against the known parameters
    ///
    /// Pure decision function: the caller owns persistence and must store
    /// the returned parameters only on `Accepted`.
    pub fn apply(known: &PlanParameters, update: &ParameterUpdate) -> GateOutcome {
        let mut next = known.clone();
        let mut correction = None;

        // A load change invalidates previously chosen slots before the rest
        // of the update is considered
        let mut cleared_stored_slots = false;
        if let Some(load) = update.load {
            if next.load != Some(load) {
                if next.preferred_time_slots.take().is_some() {
                    cleared_stored_slots = true;
                    debug!(%load, "load changed, stored time slots cleared");
                }
                next.load = Some(load);
            }
        }

        if let Some(duration) = update.duration {
            next.duration = Some(duration);
        }
        if let Some(focus) = update.focus {
            next.focus = Some(focus);
        }

        let supplied = update.preferred_time_slots.as_deref().map(dedup_slots);

        match next.load {
            Some(Load::Intensive) => {
                // Slots are not user-chosen on INTENSIVE; install the
                // canonical set and surface a correction when that overrides
                // a choice the user made or previously held
                let canonical = policy::INTENSIVE_SLOTS;
                let supplied_differs = supplied
                    .as_deref()
                    .is_some_and(|slots| !same_slot_set(slots, &canonical));
                if supplied_differs {
                    correction = Some(
                        "An INTENSIVE plan always uses the fixed morning, day and evening slots."
                            .to_string(),
                    );
                } else if cleared_stored_slots {
                    correction = Some(
                        "Your previous time slots did not fit an INTENSIVE plan; they were reset \
                         to morning, day and evening."
                            .to_string(),
                    );
                }
                next.preferred_time_slots = Some(canonical.to_vec());
            }
            Some(load) => {
                if let Some(slots) = supplied {
                    let expected = policy::expected_slot_count(load);
                    if slots.len() != expected {
                        debug!(%load, expected, got = slots.len(), "slot count mismatch");
                        return GateOutcome::Rejected {
                            reason: GateError::SlotCountMismatch {
                                load,
                                expected,
                                got: slots.len(),
                            },
                            correction: format!(
                                "A {} plan needs exactly {} distinct time slot{} from morning, \
                                 day and evening.",
                                load,
                                expected,
                                if expected == 1 { "" } else { "s" }
                            ),
                        };
                    }
                    next.preferred_time_slots = Some(slots);
                } else if cleared_stored_slots {
                    correction = Some(format!(
                        "Your daily load changed to {}; please pick your preferred time slots \
                         again.",
                        load
                    ));
                }
            }
            None => {
                if supplied.is_some() {
                    return GateOutcome::Rejected {
                        reason: GateError::MissingBaseParameter("load"),
                        correction: "Pick a daily load (LITE, MID or INTENSIVE) before choosing \
                                     time slots."
                            .to_string(),
                    };
                }
            }
        }

        let ready = Self::ready_for_confirmation(&next);
        debug!(ready, "update accepted");
        GateOutcome::Accepted {
            parameters: next,
            ready_for_confirmation: ready,
            correction,
        }
    }

    /// Readiness check: all pillars set and slot cardinality fits the load
    ///
    /// This is the only condition under which the conversation may move to
    /// confirmation.
    pub fn ready_for_confirmation(params: &PlanParameters) -> bool {
        match (params.duration, params.focus, params.load) {
            (Some(_), Some(_), Some(load)) => {
                params.slot_count() == policy::expected_slot_count(load)
            }
            _ => false,
        }
    }
}

/// Drop duplicate slots, keeping the user's stated order
fn dedup_slots(raw: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut out = Vec::with_capacity(raw.len());
    for &slot in raw {
        if !out.contains(&slot) {
            out.push(slot);
        }
    }
    out
}

/// Set equality regardless of stated order
fn same_slot_set(a: &[TimeSlot], b: &[TimeSlot]) -> bool {
    let mut a_sorted = a.to_vec();
    let mut b_sorted = b.to_vec();
    a_sorted.sort_unstable();
    b_sorted.sort_unstable();
    a_sorted == b_sorted
}
