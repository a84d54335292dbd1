//! SessionManager - actor that owns per-user planning state
//!
//! Processes commands via channels so all mutations for a user flow through
//! one task. Rejected updates and failed builds leave stored state
//! byte-identical; usage history is written only after a successful build.

use std::collections::HashMap;
use std::sync::Arc;

use contentlib::Catalog;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::builder::DraftBuilder;
use crate::domain::{Draft, PlanParameters, UsageHistory};
use crate::gate::{
    ConversationState, GateOutcome, ParameterGate, ParameterUpdate, TransitionSignal, apply_signal,
};

use super::messages::{SessionCommand, SessionError, SessionResponse, SessionSnapshot};

/// One user's stored planning state
#[derive(Debug, Default)]
struct UserSession {
    state: ConversationState,
    parameters: PlanParameters,
    usage: UsageHistory,
}

/// Handle to send commands to the SessionManager
#[derive(Clone)]
pub struct SessionManager {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionManager {
    /// Spawn a new SessionManager actor over a catalog snapshot
    pub fn spawn(catalog: Arc<Catalog>, channel_capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(channel_capacity.max(1));
        tokio::spawn(actor_loop(catalog, rx));
        info!("SessionManager spawned");
        Self { tx }
    }

    /// Run a parameter delta through the gate for a user
    pub async fn apply_update(
        &self,
        user_id: &str,
        update: ParameterUpdate,
    ) -> SessionResponse<GateOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::ApplyUpdate {
                user_id: user_id.to_string(),
                update,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::ChannelError)?;
        reply_rx.await.map_err(|_| SessionError::ChannelError)?
    }

    /// Apply an optional transition signal for a user
    pub async fn apply_signal(
        &self,
        user_id: &str,
        signal: Option<TransitionSignal>,
    ) -> SessionResponse<ConversationState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::ApplySignal {
                user_id: user_id.to_string(),
                signal,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::ChannelError)?;
        reply_rx.await.map_err(|_| SessionError::ChannelError)?
    }

    /// Build a draft from the user's stored parameters
    pub async fn build_draft(&self, user_id: &str) -> SessionResponse<Draft> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::BuildDraft {
                user_id: user_id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::ChannelError)?;
        reply_rx.await.map_err(|_| SessionError::ChannelError)?
    }

    /// Read a user's session snapshot
    pub async fn session(&self, user_id: &str) -> SessionResponse<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::GetSession {
                user_id: user_id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::ChannelError)?;
        reply_rx.await.map_err(|_| SessionError::ChannelError)?
    }

    /// Stop the actor
    pub async fn shutdown(&self) {
        let _ = self.tx.send(SessionCommand::Shutdown).await;
    }
}

/// The actor task: sole owner and writer of session state
async fn actor_loop(catalog: Arc<Catalog>, mut rx: mpsc::Receiver<SessionCommand>) {
    let mut sessions: HashMap<String, UserSession> = HashMap::new();

    while let Some(command) = rx.recv().await {
        match command {
            SessionCommand::ApplyUpdate {
                user_id,
                update,
                reply,
            } => {
                let session = sessions.entry(user_id.clone()).or_default();
                let outcome = ParameterGate::apply(&session.parameters, &update);
                if let GateOutcome::Accepted { parameters, .. } = &outcome {
                    // the only place stored parameters change
                    session.parameters = parameters.clone();
                    debug!(%user_id, "parameters committed");
                }
                let _ = reply.send(Ok(outcome));
            }

            SessionCommand::ApplySignal {
                user_id,
                signal,
                reply,
            } => {
                let session = sessions.entry(user_id.clone()).or_default();
                let result = match apply_signal(session.state, signal) {
                    Ok(next) => {
                        session.state = next;
                        Ok(next)
                    }
                    Err(e) => Err(SessionError::Signal(e)),
                };
                let _ = reply.send(result);
            }

            SessionCommand::BuildDraft { user_id, reply } => {
                let session = sessions.entry(user_id.clone()).or_default();
                let result = build_for(&catalog, &user_id, session);
                let _ = reply.send(result);
            }

            SessionCommand::GetSession { user_id, reply } => {
                let session = sessions.entry(user_id.clone()).or_default();
                let snapshot = SessionSnapshot {
                    state: session.state,
                    parameters: session.parameters.clone(),
                    ready_for_confirmation: ParameterGate::ready_for_confirmation(
                        &session.parameters,
                    ),
                };
                let _ = reply.send(Ok(snapshot));
            }

            SessionCommand::Shutdown => {
                info!("SessionManager shutting down");
                break;
            }
        }
    }
}

/// Build a draft for one user and fold usage in on success
fn build_for(
    catalog: &Catalog,
    user_id: &str,
    session: &mut UserSession,
) -> SessionResponse<Draft> {
    if !ParameterGate::ready_for_confirmation(&session.parameters) {
        return Err(SessionError::NotReady);
    }

    let draft = DraftBuilder::new(catalog).build(user_id, &session.parameters, &session.usage)?;

    // cooldown bookkeeping becomes visible to later builds only now
    session.usage.absorb_draft(&draft);
    Ok(draft)
}
