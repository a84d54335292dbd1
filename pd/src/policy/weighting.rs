//! Focus-driven category weighting
//!
//! A focus concentrates most slots on its dominant category and spreads the
//! rest across complementary ones. Ratios are fixed configuration constants;
//! quotas are apportioned deterministically over the plan's total slot
//! count, never sampled per slot.

use crate::domain::{Category, Focus};

/// Target category shares for a focus, dominant first
///
/// Each table sums to 1.0. MIXED has no dominant category and balances
/// across all four.
pub fn category_weights(focus: Focus) -> &'static [(Category, f64)] {
    match focus {
        Focus::Somatic => &[
            (Category::Somatic, 0.8),
            (Category::Cognitive, 0.1),
            (Category::Rest, 0.1),
        ],
        Focus::Cognitive => &[
            (Category::Cognitive, 0.8),
            (Category::Somatic, 0.1),
            (Category::Boundaries, 0.1),
        ],
        Focus::Boundaries => &[
            (Category::Boundaries, 0.8),
            (Category::Cognitive, 0.15),
            (Category::Rest, 0.05),
        ],
        Focus::Rest => &[(Category::Rest, 0.9), (Category::Somatic, 0.1)],
        Focus::Mixed => &[
            (Category::Somatic, 0.3),
            (Category::Cognitive, 0.3),
            (Category::Boundaries, 0.25),
            (Category::Rest, 0.15),
        ],
    }
}

/// Apportion the target shares over a concrete slot count
///
/// Largest-remainder apportionment: floor every share, then hand leftover
/// slots to the largest fractional remainders, table order breaking ties.
/// The returned quotas keep the table's order (dominant first) and always
/// sum to `total_slots`.
pub fn category_quotas(focus: Focus, total_slots: usize) -> Vec<(Category, usize)> {
    let weights = category_weights(focus);

    let mut floors: Vec<(Category, usize)> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<f64> = Vec::with_capacity(weights.len());
    for &(category, weight) in weights {
        let exact = weight * total_slots as f64;
        floors.push((category, exact.floor() as usize));
        remainders.push(exact - exact.floor());
    }

    let assigned: usize = floors.iter().map(|(_, n)| n).sum();
    let mut leftover = total_slots.saturating_sub(assigned);

    while leftover > 0 {
        let mut best = 0;
        for (i, remainder) in remainders.iter().enumerate() {
            if remainder.total_cmp(&remainders[best]) == std::cmp::Ordering::Greater {
                best = i;
            }
        }
        floors[best].1 += 1;
        remainders[best] = -1.0;
        leftover -= 1;
    }

    floors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        for focus in [
            Focus::Somatic,
            Focus::Cognitive,
            Focus::Boundaries,
            Focus::Rest,
            Focus::Mixed,
        ] {
            let total: f64 = category_weights(focus).iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "{focus} weights sum to {total}");
        }
    }

    #[test]
    fn test_quotas_sum_to_total() {
        for focus in [
            Focus::Somatic,
            Focus::Cognitive,
            Focus::Boundaries,
            Focus::Rest,
            Focus::Mixed,
        ] {
            for total in [1usize, 7, 14, 28, 90, 270] {
                let quotas = category_quotas(focus, total);
                let sum: usize = quotas.iter().map(|(_, n)| n).sum();
                assert_eq!(sum, total, "{focus}/{total}");
            }
        }
    }

    #[test]
    fn test_dominant_category_leads() {
        let quotas = category_quotas(Focus::Somatic, 28);
        assert_eq!(quotas[0].0, Category::Somatic);
        // 80% of 28 slots, within one apportionment step
        assert!(quotas[0].1 >= 22);
    }

    #[test]
    fn test_complementary_categories_receive_slots() {
        let quotas = category_quotas(Focus::Somatic, 28);
        let complementary: usize = quotas[1..].iter().map(|(_, n)| n).sum();
        assert!(complementary >= 4, "expected a spread, got {complementary}");
    }

    #[test]
    fn test_mixed_is_balanced() {
        let quotas = category_quotas(Focus::Mixed, 28);
        assert_eq!(quotas.len(), 4);
        for (category, count) in &quotas {
            assert!(*count >= 4, "{category} starved with {count}");
        }
    }

    #[test]
    fn test_single_slot_goes_to_dominant() {
        let quotas = category_quotas(Focus::Rest, 1);
        assert_eq!(quotas[0], (Category::Rest, 1));
    }
}
