//! Time-slot assignment
//!
//! Places a chosen exercise into a concrete time-of-day bucket. Slot types
//! have a natural affinity (CORE leans morning, REST leans evening), but
//! the user's preferred set is a hard boundary: a step is never scheduled
//! outside it, even when that forces a repeat.

use crate::domain::{SlotType, TimeSlot};

/// Natural time-of-day affinity of a slot type, strongest first
pub fn affinity(slot_type: SlotType) -> &'static [TimeSlot] {
    match slot_type {
        SlotType::Core => &[TimeSlot::Morning, TimeSlot::Day],
        SlotType::Support => &[TimeSlot::Day, TimeSlot::Evening],
        SlotType::Rest => &[TimeSlot::Evening],
    }
}

/// Assign a time slot for a step
///
/// Preference order: an affinity slot from `preferred` not yet used today,
/// then any unused preferred slot, then a repeated preferred slot (affinity
/// first). Returns `None` only when `preferred` is empty, which the builder
/// treats as a precondition breach. Whenever `preferred` has at least as
/// many distinct slots as the day schedules, no repeats occur.
pub fn assign(
    slot_type: SlotType,
    preferred: &[TimeSlot],
    used_today: &[TimeSlot],
) -> Option<TimeSlot> {
    if preferred.is_empty() {
        return None;
    }

    let unused = |slot: &TimeSlot| !used_today.contains(slot);

    if let Some(&slot) = affinity(slot_type)
        .iter()
        .find(|slot| preferred.contains(slot) && unused(slot))
    {
        return Some(slot);
    }

    if let Some(&slot) = preferred.iter().find(|slot| unused(slot)) {
        return Some(slot);
    }

    // every preferred slot is taken; repeat, favoring the affinity order
    affinity(slot_type)
        .iter()
        .find(|slot| preferred.contains(slot))
        .or_else(|| preferred.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_core_prefers_morning() {
        let preferred = [TimeSlot::Morning, TimeSlot::Day];
        assert_eq!(
            assign(SlotType::Core, &preferred, &[]),
            Some(TimeSlot::Morning)
        );
    }

    #[test]
    fn test_used_slots_are_avoided() {
        let preferred = [TimeSlot::Morning, TimeSlot::Day];
        assert_eq!(
            assign(SlotType::Core, &preferred, &[TimeSlot::Morning]),
            Some(TimeSlot::Day)
        );
    }

    #[test]
    fn test_rest_falls_back_inside_preferred() {
        // REST leans evening, but evening is not preferred here
        let preferred = [TimeSlot::Morning, TimeSlot::Day];
        let slot = assign(SlotType::Rest, &preferred, &[]).unwrap();
        assert!(preferred.contains(&slot));
    }

    #[test]
    fn test_exhausted_preferred_repeats() {
        let preferred = [TimeSlot::Evening];
        assert_eq!(
            assign(SlotType::Support, &preferred, &[TimeSlot::Evening]),
            Some(TimeSlot::Evening)
        );
    }

    #[test]
    fn test_empty_preferred_is_unassignable() {
        assert!(assign(SlotType::Core, &[], &[]).is_none());
    }

    #[test]
    fn test_full_day_has_no_repeats() {
        let preferred = [TimeSlot::Morning, TimeSlot::Day, TimeSlot::Evening];
        let mut used = Vec::new();
        for slot_type in [SlotType::Core, SlotType::Support, SlotType::Rest] {
            let slot = assign(slot_type, &preferred, &used).unwrap();
            assert!(!used.contains(&slot), "{slot} repeated");
            used.push(slot);
        }
        assert_eq!(used.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_assignment_stays_inside_preferred(
            preferred in proptest::sample::subsequence(
                vec![TimeSlot::Morning, TimeSlot::Day, TimeSlot::Evening], 1..=3),
            used in proptest::collection::vec(
                proptest::sample::select(
                    vec![TimeSlot::Morning, TimeSlot::Day, TimeSlot::Evening]), 0..4),
            slot_type in proptest::sample::select(
                vec![SlotType::Core, SlotType::Support, SlotType::Rest]),
        ) {
            let slot = assign(slot_type, &preferred, &used).unwrap();
            prop_assert!(preferred.contains(&slot));
        }

        #[test]
        fn prop_no_repeat_when_capacity_allows(
            preferred in proptest::sample::subsequence(
                vec![TimeSlot::Morning, TimeSlot::Day, TimeSlot::Evening], 1..=3),
        ) {
            // schedule exactly as many steps as there are preferred slots
            let mut used = Vec::new();
            for _ in 0..preferred.len() {
                let slot = assign(SlotType::Core, &preferred, &used).unwrap();
                prop_assert!(!used.contains(&slot));
                used.push(slot);
            }
        }
    }
}
