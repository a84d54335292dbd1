//! Plan-flow transition signals
//!
//! The conversational agent may propose at most one transition signal per
//! turn. The vocabulary is closed and every state carries an allow-list;
//! anything outside it is rejected, never forwarded.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Conversation states of the planning flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConversationState {
    /// No planning activity
    #[default]
    #[serde(rename = "IDLE")]
    Idle,

    /// Collecting the three pillars and time slots
    #[serde(rename = "PLAN_FLOW:DATA_COLLECTION")]
    DataCollection,

    /// Parameters complete, awaiting user confirmation
    #[serde(rename = "PLAN_FLOW:CONFIRMATION_PENDING")]
    ConfirmationPending,

    /// Confirmed, the draft is being generated
    #[serde(rename = "PLAN_FLOW:FINALIZATION")]
    Finalization,

    /// A plan is live
    #[serde(rename = "ACTIVE")]
    Active,

    /// Planning was abandoned before finalization
    #[serde(rename = "IDLE_PLAN_ABORTED")]
    IdlePlanAborted,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::DataCollection => write!(f, "PLAN_FLOW:DATA_COLLECTION"),
            Self::ConfirmationPending => write!(f, "PLAN_FLOW:CONFIRMATION_PENDING"),
            Self::Finalization => write!(f, "PLAN_FLOW:FINALIZATION"),
            Self::Active => write!(f, "ACTIVE"),
            Self::IdlePlanAborted => write!(f, "IDLE_PLAN_ABORTED"),
        }
    }
}

/// Transition signals the agent may emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionSignal {
    #[serde(rename = "PLAN_FLOW:DATA_COLLECTION")]
    DataCollection,

    #[serde(rename = "PLAN_FLOW:CONFIRMATION_PENDING")]
    ConfirmationPending,

    #[serde(rename = "PLAN_FLOW:FINALIZATION")]
    Finalization,

    #[serde(rename = "ACTIVE")]
    Active,

    #[serde(rename = "IDLE_PLAN_ABORTED")]
    PlanAborted,
}

impl TransitionSignal {
    /// The state this signal moves the conversation into
    pub fn target_state(self) -> ConversationState {
        match self {
            Self::DataCollection => ConversationState::DataCollection,
            Self::ConfirmationPending => ConversationState::ConfirmationPending,
            Self::Finalization => ConversationState::Finalization,
            Self::Active => ConversationState::Active,
            Self::PlanAborted => ConversationState::IdlePlanAborted,
        }
    }
}

impl std::fmt::Display for TransitionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.target_state())
    }
}

impl ConversationState {
    /// Signals this state accepts (a null signal is always allowed and
    /// leaves the state unchanged)
    pub fn allowed_signals(self) -> &'static [TransitionSignal] {
        match self {
            Self::Idle => &[TransitionSignal::DataCollection],
            Self::DataCollection => &[TransitionSignal::ConfirmationPending],
            Self::ConfirmationPending => {
                &[TransitionSignal::Finalization, TransitionSignal::PlanAborted]
            }
            Self::Finalization => &[TransitionSignal::Active],
            Self::Active => &[TransitionSignal::DataCollection],
            Self::IdlePlanAborted => &[TransitionSignal::DataCollection],
        }
    }
}

/// Rejection of a signal outside the current state's allow-list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("Transition signal {signal} is not allowed in state {state}")]
    InvalidTransitionSignal {
        state: ConversationState,
        signal: TransitionSignal,
    },
}

/// Apply an optional transition signal to a state
///
/// A null signal keeps the state; a listed signal moves to its target; an
/// unlisted signal is rejected and the state is left untouched.
pub fn apply_signal(
    state: ConversationState,
    signal: Option<TransitionSignal>,
) -> Result<ConversationState, SignalError> {
    match signal {
        None => Ok(state),
        Some(signal) if state.allowed_signals().contains(&signal) => {
            let next = signal.target_state();
            debug!(%state, %signal, %next, "transition applied");
            Ok(next)
        }
        Some(signal) => Err(SignalError::InvalidTransitionSignal { state, signal }),
    }
}
