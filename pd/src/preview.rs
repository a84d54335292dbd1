//! Confirmation preview
//!
//! Renders a plain-text card summarizing a draft before the user confirms
//! it: the chosen parameters plus a short sample of steps. Rendering only;
//! no business logic and no plan interpretation happens here.

use crate::domain::{Draft, DraftStep, PlanParameters};

/// Maximum sample steps shown on the card
const MAX_PREVIEW_STEPS: usize = 5;

/// Minimum sample steps when the draft has enough material
const MIN_PREVIEW_STEPS: usize = 3;

/// Build the confirmation card for a draft
pub fn confirmation_card(draft: &Draft, parameters: &PlanParameters) -> String {
    let mut lines = vec![
        "Draft plan (not yet active)".to_string(),
        "DRAFT / NOT ACTIVE".to_string(),
        String::new(),
        "Plan parameters".to_string(),
        format!(
            "- Duration: {}",
            parameters
                .duration
                .map_or_else(|| "-".to_string(), |d| d.to_string())
        ),
        format!(
            "- Focus: {}",
            parameters
                .focus
                .map_or_else(|| "-".to_string(), |f| f.to_string())
        ),
        format!(
            "- Load: {}",
            parameters
                .load
                .map_or_else(|| "-".to_string(), |l| l.to_string())
        ),
        format!("- Time slots: {}", slot_line(parameters)),
        String::new(),
        "Plan structure - sample".to_string(),
    ];

    for step in sample_steps(draft) {
        lines.push(format!("Day {} / {}", step.day_number, step.time_slot));
        lines.push(format!("- {} ({})", step.exercise_name, step.category));
    }

    lines.push(String::new());
    lines.push("This plan is not active yet. You can change parameters, regenerate it, or confirm it.".to_string());
    lines.join("\n")
}

fn slot_line(parameters: &PlanParameters) -> String {
    match parameters.preferred_time_slots.as_deref() {
        Some(slots) if !slots.is_empty() => slots
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        _ => "-".to_string(),
    }
}

/// Pick up to five sample steps, the first per (day, time slot), and pad to
/// at least three when more steps exist
fn sample_steps(draft: &Draft) -> Vec<&DraftStep> {
    let mut ordered: Vec<&DraftStep> = draft.steps.iter().collect();
    ordered.sort_by(|a, b| {
        a.day_number
            .cmp(&b.day_number)
            .then_with(|| a.time_slot.cmp(&b.time_slot))
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
    });

    let mut selected: Vec<&DraftStep> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for &step in &ordered {
        if seen.insert((step.day_number, step.time_slot)) {
            selected.push(step);
            if selected.len() >= MAX_PREVIEW_STEPS {
                break;
            }
        }
    }

    if selected.len() < MIN_PREVIEW_STEPS {
        for &step in &ordered {
            if !selected.iter().any(|s| std::ptr::eq(*s, step)) {
                selected.push(step);
                if selected.len() >= MIN_PREVIEW_STEPS {
                    break;
                }
            }
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Duration, Focus, Load, SlotType, TimeSlot};
    use contentlib::Category;

    fn step(day: u32, slot: u32, time_slot: TimeSlot, name: &str) -> DraftStep {
        DraftStep {
            day_number: day,
            slot_index: slot,
            slot_type: SlotType::Core,
            exercise_id: format!("ex-{day}-{slot}"),
            exercise_name: name.to_string(),
            category: Category::Somatic,
            difficulty: 1,
            time_slot,
        }
    }

    fn draft() -> Draft {
        Draft {
            total_days: 3,
            total_steps: 6,
            is_valid: true,
            steps: vec![
                step(1, 0, TimeSlot::Morning, "box breathing"),
                step(1, 1, TimeSlot::Day, "walk outside"),
                step(2, 0, TimeSlot::Morning, "stretching"),
                step(2, 1, TimeSlot::Day, "journaling"),
                step(3, 0, TimeSlot::Morning, "body scan"),
                step(3, 1, TimeSlot::Day, "say no once"),
            ],
        }
    }

    fn params() -> PlanParameters {
        PlanParameters {
            duration: Some(Duration::Standard),
            focus: Some(Focus::Somatic),
            load: Some(Load::Mid),
            preferred_time_slots: Some(vec![TimeSlot::Morning, TimeSlot::Day]),
        }
    }

    #[test]
    fn test_card_contains_parameters() {
        let card = confirmation_card(&draft(), &params());
        assert!(card.contains("- Duration: STANDARD"));
        assert!(card.contains("- Focus: somatic"));
        assert!(card.contains("- Load: MID"));
        assert!(card.contains("- Time slots: MORNING, DAY"));
    }

    #[test]
    fn test_card_shows_missing_parameters_as_dashes() {
        let card = confirmation_card(&draft(), &PlanParameters::default());
        assert!(card.contains("- Duration: -"));
        assert!(card.contains("- Time slots: -"));
    }

    #[test]
    fn test_sample_capped_at_five_distinct_day_slots() {
        let d = draft();
        let samples = sample_steps(&d);
        assert_eq!(samples.len(), 5);

        let mut seen = std::collections::HashSet::new();
        for step in samples {
            assert!(seen.insert((step.day_number, step.time_slot)));
        }
    }

    #[test]
    fn test_sample_starts_at_day_one_morning() {
        let d = draft();
        let samples = sample_steps(&d);
        assert_eq!(samples[0].exercise_name, "box breathing");
    }

    #[test]
    fn test_card_is_not_active_framing() {
        let card = confirmation_card(&draft(), &params());
        assert!(card.contains("not yet active"));
        assert!(card.contains("DRAFT / NOT ACTIVE"));
    }
}
