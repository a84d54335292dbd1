//! Progressive difficulty ceilings
//!
//! Difficulty ramps up over the first weeks and never regresses within a
//! plan, so a draft can only get harder, not easier, as days pass.

/// Week index (1-based) a day belongs to
pub fn week_of_day(day_number: u32) -> u32 {
    (day_number.saturating_sub(1) / 7) + 1
}

/// Maximum exercise difficulty allowed in a week
///
/// Week 1 stays at difficulty 1, week 2 allows 2, everything later allows
/// the full range.
pub fn max_difficulty_for_week(week: u32) -> u8 {
    week.clamp(1, 3) as u8
}
