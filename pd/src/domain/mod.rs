//! Domain types for Plandaemon
//!
//! Core domain types: plan parameters, drafts, usage bookkeeping, and
//! adaptation records. Catalog item types live in the `contentlib` crate.

mod adaptation;
mod draft;
mod id;
mod params;
mod usage;

pub use adaptation::{AdaptationCategory, AdaptationIntent, AdaptationRecord, AdaptationStatus};
pub use draft::{Draft, DraftStep, SlotType};
pub use id::generate_id;
pub use params::{Duration, Focus, Load, PlanParameters, TimeSlot};
pub use usage::UsageHistory;

// Re-export contentlib types for convenience
pub use contentlib::{Catalog, CatalogError, Category, ContentItem, PriorityTier};
