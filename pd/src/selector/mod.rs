//! Candidate selection
//!
//! Picks one exercise for a slot from an already cooldown-filtered pool.
//! Three progressively looser filter tiers keep selection from starving when
//! the strict match is empty; the final pick is a seeded weighted choice so
//! the same (user, day, slot) always draws the same item from the same pool.

use contentlib::ContentItem;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::{Category, SlotType};

/// Slot-specific candidate constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Category the weighting asked for
    pub preferred_category: Category,
    /// Slot type whose tier candidates should match
    pub slot_type: SlotType,
    /// Difficulty ceiling for the day
    pub max_difficulty: u8,
}

/// Seed material for one selection
///
/// A fresh generator is built from this key for every call; nothing is
/// shared or globally seeded, so calls with distinct keys are independent
/// and safe to run in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedKey {
    user_id: String,
    day_index: u32,
    slot_index: u32,
}

impl SeedKey {
    pub fn new(user_id: impl Into<String>, day_index: u32, slot_index: u32) -> Self {
        Self {
            user_id: user_id.into(),
            day_index,
            slot_index,
        }
    }

    /// Derive the 64-bit generator seed
    ///
    /// SHA-256 over `user:day:slot`, first 8 bytes big-endian. The digest is
    /// stable, so the seed does not depend on process or platform state.
    pub fn seed(&self) -> u64 {
        let digest = Sha256::digest(format!(
            "{}:{}:{}",
            self.user_id, self.day_index, self.slot_index
        ));
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(bytes)
    }
}

/// Pick an exercise for a slot, trying three tiers in order
///
/// 1. preferred category, matching tier, within the difficulty ceiling
/// 2. any category, matching tier, within the ceiling
/// 3. any category within the ceiling
///
/// The first non-empty tier wins. `None` means even tier 3 is empty and the
/// caller must treat the slot as unfillable.
pub fn select_with_fallback<'a>(
    pool: &[&'a ContentItem],
    filter: &CandidateFilter,
    seed_key: &SeedKey,
) -> Option<&'a ContentItem> {
    let tier = filter.slot_type.tier();
    let within_ceiling = |item: &ContentItem| item.difficulty <= filter.max_difficulty;

    let tier1: Vec<&ContentItem> = pool
        .iter()
        .copied()
        .filter(|item| {
            item.category == filter.preferred_category
                && item.priority_tier == tier
                && within_ceiling(item)
        })
        .collect();
    if !tier1.is_empty() {
        return weighted_choice(tier1, seed_key.seed());
    }

    let tier2: Vec<&ContentItem> = pool
        .iter()
        .copied()
        .filter(|item| item.priority_tier == tier && within_ceiling(item))
        .collect();
    if !tier2.is_empty() {
        debug!(
            category = %filter.preferred_category,
            tier = %tier,
            "tier 1 empty, relaxing category"
        );
        return weighted_choice(tier2, seed_key.seed());
    }

    let tier3: Vec<&ContentItem> = pool
        .iter()
        .copied()
        .filter(|item| within_ceiling(item))
        .collect();
    if tier3.is_empty() {
        return None;
    }
    debug!(tier = %tier, "tier 2 empty, relaxing priority tier");
    weighted_choice(tier3, seed_key.seed())
}

/// Draw one item with probability proportional to its base weight
///
/// The pool is first sorted by (name, id) so callers may pass candidates in
/// any order; the generator is constructed freshly from the seed. Higher
/// weight raises the odds but never guarantees selection.
pub fn weighted_choice<'a>(mut pool: Vec<&'a ContentItem>, seed: u64) -> Option<&'a ContentItem> {
    if pool.is_empty() {
        return None;
    }

    pool.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let mut rng = StdRng::seed_from_u64(seed);
    match WeightedIndex::new(pool.iter().map(|item| item.base_weight)) {
        Ok(dist) => Some(pool[dist.sample(&mut rng)]),
        Err(e) => {
            // weights are validated positive at catalog construction; an
            // invalid distribution still must not abort a build
            warn!(error = %e, "weighted distribution rejected, falling back to first candidate");
            pool.first().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentlib::PriorityTier;

    fn item(
        id: &str,
        category: Category,
        tier: PriorityTier,
        difficulty: u8,
        weight: f64,
    ) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            name: format!("name-{id}"),
            category,
            difficulty,
            cooldown_days: 0,
            base_weight: weight,
            priority_tier: tier,
            is_active: true,
        }
    }

    fn key() -> SeedKey {
        SeedKey::new("user-1", 0, 0)
    }

    #[test]
    fn test_seed_is_stable_and_distinct() {
        let a = SeedKey::new("user-1", 3, 1);
        let b = SeedKey::new("user-1", 3, 1);
        assert_eq!(a.seed(), b.seed());

        assert_ne!(a.seed(), SeedKey::new("user-1", 3, 2).seed());
        assert_ne!(a.seed(), SeedKey::new("user-1", 4, 1).seed());
        assert_ne!(a.seed(), SeedKey::new("user-2", 3, 1).seed());
    }

    #[test]
    fn test_tier1_preferred_category_wins() {
        let somatic = item("a", Category::Somatic, PriorityTier::Core, 1, 1.0);
        let cognitive = item("b", Category::Cognitive, PriorityTier::Core, 1, 100.0);
        let pool = vec![&somatic, &cognitive];

        let filter = CandidateFilter {
            preferred_category: Category::Somatic,
            slot_type: SlotType::Core,
            max_difficulty: 3,
        };
        let picked = select_with_fallback(&pool, &filter, &key()).unwrap();
        assert_eq!(picked.id, "a");
    }

    #[test]
    fn test_tier2_relaxes_category() {
        let cognitive = item("b", Category::Cognitive, PriorityTier::Core, 1, 1.0);
        let pool = vec![&cognitive];

        let filter = CandidateFilter {
            preferred_category: Category::Somatic,
            slot_type: SlotType::Core,
            max_difficulty: 3,
        };
        let picked = select_with_fallback(&pool, &filter, &key()).unwrap();
        assert_eq!(picked.id, "b");
    }

    #[test]
    fn test_tier3_relaxes_priority_tier() {
        let support = item("c", Category::Rest, PriorityTier::Support, 1, 1.0);
        let pool = vec![&support];

        let filter = CandidateFilter {
            preferred_category: Category::Somatic,
            slot_type: SlotType::Core,
            max_difficulty: 3,
        };
        let picked = select_with_fallback(&pool, &filter, &key()).unwrap();
        assert_eq!(picked.id, "c");
    }

    #[test]
    fn test_difficulty_ceiling_is_never_relaxed() {
        let hard = item("d", Category::Somatic, PriorityTier::Core, 3, 1.0);
        let pool = vec![&hard];

        let filter = CandidateFilter {
            preferred_category: Category::Somatic,
            slot_type: SlotType::Core,
            max_difficulty: 1,
        };
        assert!(select_with_fallback(&pool, &filter, &key()).is_none());
    }

    #[test]
    fn test_empty_pool_returns_none() {
        let filter = CandidateFilter {
            preferred_category: Category::Somatic,
            slot_type: SlotType::Core,
            max_difficulty: 3,
        };
        assert!(select_with_fallback(&[], &filter, &key()).is_none());
    }

    #[test]
    fn test_weighted_choice_deterministic() {
        let a = item("a", Category::Somatic, PriorityTier::Core, 1, 1.0);
        let b = item("b", Category::Somatic, PriorityTier::Core, 1, 2.0);
        let c = item("c", Category::Somatic, PriorityTier::Core, 1, 3.0);

        let first = weighted_choice(vec![&a, &b, &c], 42).unwrap();
        let second = weighted_choice(vec![&a, &b, &c], 42).unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_weighted_choice_ignores_input_order() {
        let a = item("a", Category::Somatic, PriorityTier::Core, 1, 1.0);
        let b = item("b", Category::Somatic, PriorityTier::Core, 1, 2.0);
        let c = item("c", Category::Somatic, PriorityTier::Core, 1, 3.0);

        let forward = weighted_choice(vec![&a, &b, &c], 7).unwrap();
        let backward = weighted_choice(vec![&c, &b, &a], 7).unwrap();
        assert_eq!(forward.id, backward.id);
    }

    #[test]
    fn test_weighted_choice_favors_heavy_items() {
        let heavy = item("heavy", Category::Somatic, PriorityTier::Core, 1, 50.0);
        let light = item("light", Category::Somatic, PriorityTier::Core, 1, 0.5);

        let mut heavy_picks = 0;
        for seed in 0..200u64 {
            let picked = weighted_choice(vec![&heavy, &light], seed).unwrap();
            if picked.id == "heavy" {
                heavy_picks += 1;
            }
        }
        // ~99% expected; anything above a clear majority proves the bias
        assert!(heavy_picks > 150, "heavy picked only {heavy_picks}/200 times");
    }

    #[test]
    fn test_weighted_choice_can_pick_light_items() {
        // weight shifts odds, it does not hard-exclude: across many seeds
        // the light item must appear at least once
        let heavy = item("heavy", Category::Somatic, PriorityTier::Core, 1, 5.0);
        let light = item("light", Category::Somatic, PriorityTier::Core, 1, 1.0);

        let light_picked = (0..200u64)
            .any(|seed| weighted_choice(vec![&heavy, &light], seed).unwrap().id == "light");
        assert!(light_picked);
    }
}
