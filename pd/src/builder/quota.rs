//! Category quota consumption
//!
//! The focus weighting is apportioned once over the plan's total slot count
//! and then consumed slot by slot: the dominant category first while its
//! quota lasts, then whichever category has the most left, table order
//! breaking ties. Purely positional, so the request sequence is a function
//! of (focus, total slots) alone.

use crate::domain::{Category, Focus};
use crate::policy;

pub(crate) struct CategoryQuotas {
    /// (category, remaining) in weighting-table order, dominant first
    remaining: Vec<(Category, usize)>,
}

impl CategoryQuotas {
    pub(crate) fn new(focus: Focus, total_slots: usize) -> Self {
        Self {
            remaining: policy::category_quotas(focus, total_slots),
        }
    }

    /// Category to request for the next slot, consuming its quota
    ///
    /// When every quota is spent (callers never ask past the total), the
    /// dominant category is returned unconsumed.
    pub(crate) fn take_next(&mut self) -> Category {
        if self.remaining[0].1 > 0 {
            self.remaining[0].1 -= 1;
            return self.remaining[0].0;
        }

        let mut best: Option<usize> = None;
        for (i, &(_, left)) in self.remaining.iter().enumerate() {
            if left > 0 && best.is_none_or(|b| left > self.remaining[b].1) {
                best = Some(i);
            }
        }

        match best {
            Some(i) => {
                self.remaining[i].1 -= 1;
                self.remaining[i].0
            }
            None => self.remaining[0].0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_consumed_first() {
        let mut quotas = CategoryQuotas::new(Focus::Somatic, 10);
        // 10 slots: somatic 8, cognitive 1, rest 1
        for _ in 0..8 {
            assert_eq!(quotas.take_next(), Category::Somatic);
        }
        let tail = [quotas.take_next(), quotas.take_next()];
        assert!(tail.contains(&Category::Cognitive));
        assert!(tail.contains(&Category::Rest));
    }

    #[test]
    fn test_sequence_is_deterministic() {
        let seq_a: Vec<Category> = {
            let mut q = CategoryQuotas::new(Focus::Mixed, 21);
            (0..21).map(|_| q.take_next()).collect()
        };
        let seq_b: Vec<Category> = {
            let mut q = CategoryQuotas::new(Focus::Mixed, 21);
            (0..21).map(|_| q.take_next()).collect()
        };
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_sequence_matches_quotas() {
        let mut q = CategoryQuotas::new(Focus::Boundaries, 28);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..28 {
            *counts.entry(q.take_next()).or_insert(0usize) += 1;
        }
        for (category, target) in policy::category_quotas(Focus::Boundaries, 28) {
            assert_eq!(counts.get(&category).copied().unwrap_or(0), target);
        }
    }

    #[test]
    fn test_exhausted_quotas_fall_back_to_dominant() {
        let mut q = CategoryQuotas::new(Focus::Rest, 2);
        q.take_next();
        q.take_next();
        assert_eq!(q.take_next(), Category::Rest);
    }
}
