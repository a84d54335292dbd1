//! Slot allocation and duration tables

use crate::domain::{Duration, Load, SlotType, TimeSlot};

/// Number of slots each day must carry for a load
pub fn expected_slot_count(load: Load) -> usize {
    match load {
        Load::Lite => 1,
        Load::Mid => 2,
        Load::Intensive => 3,
    }
}

/// The fixed slot set an INTENSIVE day always fills
pub const INTENSIVE_SLOTS: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Day, TimeSlot::Evening];

/// Fixed time-slot set for loads that do not let the user choose
///
/// INTENSIVE fills every bucket of the day; LITE and MID slots are
/// user-chosen and have no canonical set.
pub fn canonical_slots(load: Load) -> Option<&'static [TimeSlot]> {
    match load {
        Load::Intensive => Some(&INTENSIVE_SLOTS),
        Load::Lite | Load::Mid => None,
    }
}

/// Slot-type composition of a single day
///
/// Every day anchors on CORE; SUPPORT and REST join as the slot count grows.
pub fn slot_structure(load: Load) -> &'static [SlotType] {
    match load {
        Load::Lite => &[SlotType::Core],
        Load::Mid => &[SlotType::Core, SlotType::Support],
        Load::Intensive => &[SlotType::Core, SlotType::Support, SlotType::Rest],
    }
}

/// Per-day slot-type composition for the whole plan
///
/// Depends only on the load, never on content or history.
pub fn slots_by_day(load: Load, total_days: u32) -> Vec<&'static [SlotType]> {
    let structure = slot_structure(load);
    (0..total_days).map(|_| structure).collect()
}

/// Canonical day count for a duration tier
pub fn days_for(duration: Duration) -> u32 {
    match duration {
        Duration::Short => 7,
        Duration::Standard => 14,
        Duration::Long => 90,
    }
}
