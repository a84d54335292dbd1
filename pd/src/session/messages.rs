//! Session manager messages
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::builder::BuildError;
use crate::domain::{Draft, PlanParameters};
use crate::gate::{ConversationState, GateOutcome, ParameterUpdate, SignalError, TransitionSignal};

/// Errors from session operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Parameters are not ready for confirmation")]
    NotReady,

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Channel error")]
    ChannelError,
}

/// Response from session operations
pub type SessionResponse<T> = Result<T, SessionError>;

/// Read-only view of one user's session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: ConversationState,
    pub parameters: PlanParameters,
    pub ready_for_confirmation: bool,
}

/// Commands sent to the SessionManager actor
#[derive(Debug)]
pub enum SessionCommand {
    /// Run a proposed parameter delta through the gate and commit it if
    /// accepted
    ApplyUpdate {
        user_id: String,
        update: ParameterUpdate,
        reply: oneshot::Sender<SessionResponse<GateOutcome>>,
    },

    /// Apply an optional transition signal against the allow-list
    ApplySignal {
        user_id: String,
        signal: Option<TransitionSignal>,
        reply: oneshot::Sender<SessionResponse<ConversationState>>,
    },

    /// Build a draft from the stored parameters; usage history is folded in
    /// only when the build succeeds
    BuildDraft {
        user_id: String,
        reply: oneshot::Sender<SessionResponse<Draft>>,
    },

    /// Read the current session snapshot
    GetSession {
        user_id: String,
        reply: oneshot::Sender<SessionResponse<SessionSnapshot>>,
    },

    /// Stop the actor
    Shutdown,
}
