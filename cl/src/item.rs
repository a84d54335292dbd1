//! Catalog item types

use serde::{Deserialize, Serialize};

/// Thematic category of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Somatic,
    Cognitive,
    Boundaries,
    Rest,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 4] = [
        Category::Somatic,
        Category::Cognitive,
        Category::Boundaries,
        Category::Rest,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Somatic => write!(f, "somatic"),
            Self::Cognitive => write!(f, "cognitive"),
            Self::Boundaries => write!(f, "boundaries"),
            Self::Rest => write!(f, "rest"),
        }
    }
}

/// Priority tier an item is balanced for
///
/// Tiers mirror the daily slot types: a CORE item anchors a day, SUPPORT
/// items accompany it, REST items close out intensive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTier {
    Core,
    Support,
    Rest,
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "CORE"),
            Self::Support => write!(f, "SUPPORT"),
            Self::Rest => write!(f, "REST"),
        }
    }
}

/// A single exercise from the content library
///
/// Items are authored externally and never mutated here. `difficulty` is
/// 1..=3 and `base_weight` must be positive; both are enforced when a
/// catalog is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentItem {
    /// Stable identifier used for cooldown bookkeeping
    pub id: String,

    /// Internal name, also the secondary sort key for deterministic selection
    pub name: String,

    /// Thematic category
    pub category: Category,

    /// Difficulty level, 1 (easy) to 3 (hard)
    pub difficulty: u8,

    /// Minimum day gap before the item may repeat for the same user
    #[serde(default)]
    pub cooldown_days: u32,

    /// Relative selection weight, > 0
    pub base_weight: f64,

    /// Slot tier the item is balanced for
    pub priority_tier: PriorityTier,

    /// Inactive items are invisible to selection
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&Category::Boundaries).unwrap();
        assert_eq!(json, "\"boundaries\"");

        let parsed: Category = serde_json::from_str("\"somatic\"").unwrap();
        assert_eq!(parsed, Category::Somatic);
    }

    #[test]
    fn test_priority_tier_wire_format() {
        let json = serde_json::to_string(&PriorityTier::Core).unwrap();
        assert_eq!(json, "\"CORE\"");

        let parsed: PriorityTier = serde_json::from_str("\"SUPPORT\"").unwrap();
        assert_eq!(parsed, PriorityTier::Support);
    }

    #[test]
    fn test_item_deserialization_defaults() {
        let item: ContentItem = serde_json::from_str(
            r#"{
                "id": "ex-001",
                "name": "box breathing",
                "category": "somatic",
                "difficulty": 1,
                "base_weight": 1.5,
                "priority_tier": "CORE"
            }"#,
        )
        .unwrap();

        assert_eq!(item.cooldown_days, 0);
        assert!(item.is_active);
    }

    #[test]
    fn test_item_rejects_unknown_fields() {
        let result = serde_json::from_str::<ContentItem>(
            r#"{
                "id": "ex-001",
                "name": "box breathing",
                "category": "somatic",
                "difficulty": 1,
                "base_weight": 1.5,
                "priority_tier": "CORE",
                "surprise": true
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_item_rejects_unknown_category() {
        let parsed = serde_json::from_str::<Category>("\"mystic\"");
        assert!(parsed.is_err());
    }
}
