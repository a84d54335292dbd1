//! Plandaemon - deterministic self-care plan composition
//!
//! Plandaemon turns a small set of user-chosen plan parameters into a
//! day-by-day sequence of exercises from a fixed catalog, under strict
//! structural and cooldown constraints, reproducibly.
//!
//! # Core Concepts
//!
//! - **Gate Before Build**: parameter deltas pass an atomic validation gate
//!   before anything is stored; no partially valid state is observable
//! - **Deterministic Selection**: every pick is seeded from
//!   (user, day, slot), so identical inputs always produce identical drafts
//! - **Defense In Depth**: the builder re-checks the gate's preconditions and
//!   a structural validator certifies every finished draft
//! - **Single Writer Per User**: the session actor serializes parameter
//!   updates and builds for each user
//!
//! # Modules
//!
//! - [`policy`] - slot counts, day counts, difficulty ceilings, weighting
//! - [`gate`] - parameter gate and transition-signal vocabulary
//! - [`selector`] - tiered candidate fallback and seeded weighted choice
//! - [`schedule`] - time-slot assignment within a day
//! - [`builder`] - draft composition engine
//! - [`validate`] - structural draft certification
//! - [`ledger`] - adaptation snapshots and one-shot rollback
//! - [`session`] - per-user state actor

pub mod builder;
pub mod cli;
pub mod config;
pub mod domain;
pub mod gate;
pub mod ledger;
pub mod policy;
pub mod preview;
pub mod schedule;
pub mod selector;
pub mod session;
pub mod validate;

// Re-export commonly used types
pub use builder::{BuildError, DraftBuilder};
pub use config::{CatalogConfig, Config, SessionConfig, ValidationConfig};
pub use domain::{
    AdaptationCategory, AdaptationIntent, AdaptationRecord, AdaptationStatus, Draft, DraftStep,
    Duration, Focus, Load, PlanParameters, SlotType, TimeSlot, UsageHistory,
};
pub use gate::{
    ConversationState, GateError, GateOutcome, ParameterGate, ParameterUpdate, SignalError,
    TransitionSignal, apply_signal,
};
pub use ledger::{AdaptationLedger, LedgerError};
pub use selector::{CandidateFilter, SeedKey};
pub use session::{SessionCommand, SessionError, SessionManager, SessionResponse, SessionSnapshot};
pub use validate::{DraftStructureError, DraftSummary};

// Re-export contentlib types for convenience
pub use contentlib::{Catalog, CatalogError, Category, ContentItem, PriorityTier};
