//! Plan parameters: the three pillars plus preferred time slots
//!
//! A plan cannot be built until duration, focus, and load are all chosen and
//! the preferred time slots satisfy the slot policy for the load.

use contentlib::Category;
use serde::{Deserialize, Serialize};

/// Plan duration tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Duration {
    /// 7 days, rapid stabilization
    Short,
    /// 14 days, stable rhythm with progression
    Standard,
    /// 90 days, long-haul pacing
    Long,
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Short => write!(f, "SHORT"),
            Self::Standard => write!(f, "STANDARD"),
            Self::Long => write!(f, "LONG"),
        }
    }
}

impl std::str::FromStr for Duration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SHORT" => Ok(Self::Short),
            "STANDARD" => Ok(Self::Standard),
            "LONG" => Ok(Self::Long),
            _ => Err(format!("Unknown duration: {}. Use: SHORT, STANDARD, or LONG", s)),
        }
    }
}

/// Thematic emphasis of a plan, biasing category selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Somatic,
    Cognitive,
    Boundaries,
    Rest,
    Mixed,
}

impl Focus {
    /// The category a non-mixed focus concentrates on
    pub fn dominant_category(self) -> Option<Category> {
        match self {
            Self::Somatic => Some(Category::Somatic),
            Self::Cognitive => Some(Category::Cognitive),
            Self::Boundaries => Some(Category::Boundaries),
            Self::Rest => Some(Category::Rest),
            Self::Mixed => None,
        }
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Somatic => write!(f, "somatic"),
            Self::Cognitive => write!(f, "cognitive"),
            Self::Boundaries => write!(f, "boundaries"),
            Self::Rest => write!(f, "rest"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

impl std::str::FromStr for Focus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "somatic" => Ok(Self::Somatic),
            "cognitive" => Ok(Self::Cognitive),
            "boundaries" => Ok(Self::Boundaries),
            "rest" => Ok(Self::Rest),
            "mixed" => Ok(Self::Mixed),
            _ => Err(format!(
                "Unknown focus: {}. Use: somatic, cognitive, boundaries, rest, or mixed",
                s
            )),
        }
    }
}

/// Daily intensity tier fixing the number of slots per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Load {
    /// 1 exercise per day
    Lite,
    /// 2 exercises per day
    Mid,
    /// 3 exercises per day, fixed time slots
    Intensive,
}

impl std::fmt::Display for Load {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lite => write!(f, "LITE"),
            Self::Mid => write!(f, "MID"),
            Self::Intensive => write!(f, "INTENSIVE"),
        }
    }
}

impl std::str::FromStr for Load {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LITE" => Ok(Self::Lite),
            "MID" => Ok(Self::Mid),
            "INTENSIVE" => Ok(Self::Intensive),
            _ => Err(format!("Unknown load: {}. Use: LITE, MID, or INTENSIVE", s)),
        }
    }
}

/// Time-of-day bucket a step is scheduled into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    Morning,
    Day,
    Evening,
}

impl TimeSlot {
    /// All time slots in canonical order
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Day, TimeSlot::Evening];
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "MORNING"),
            Self::Day => write!(f, "DAY"),
            Self::Evening => write!(f, "EVENING"),
        }
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MORNING" => Ok(Self::Morning),
            "DAY" => Ok(Self::Day),
            "EVENING" => Ok(Self::Evening),
            _ => Err(format!("Unknown time slot: {}. Use: MORNING, DAY, or EVENING", s)),
        }
    }
}

/// The per-user plan parameters collected during the planning conversation
///
/// Every field starts absent. The parameter gate is the only writer, and it
/// guarantees that once all four fields are present they satisfy the slot
/// policy for the chosen load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanParameters {
    /// Plan length tier
    pub duration: Option<Duration>,

    /// Thematic emphasis
    pub focus: Option<Focus>,

    /// Daily intensity tier
    pub load: Option<Load>,

    /// Distinct time slots the user wants exercises scheduled into,
    /// in the user's stated order
    pub preferred_time_slots: Option<Vec<TimeSlot>>,
}

impl PlanParameters {
    /// Whether all three pillars are defined
    pub fn is_complete(&self) -> bool {
        self.duration.is_some() && self.focus.is_some() && self.load.is_some()
    }

    /// Names of the pillars still missing
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.duration.is_none() {
            missing.push("duration");
        }
        if self.focus.is_none() {
            missing.push("focus");
        }
        if self.load.is_none() {
            missing.push("load");
        }
        missing
    }

    /// Number of stored preferred time slots
    pub fn slot_count(&self) -> usize {
        self.preferred_time_slots.as_ref().map_or(0, Vec::len)
    }
}
