//! Enumeration types for the Clout simulation.
//!
//! Categorical agent attributes, earned tags, agency strategies, trend
//! scopes, and the negotiation mood and status vocabularies.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Agent attributes
// ---------------------------------------------------------------------------

/// The platform an agent primarily publishes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Platform {
    /// Long-form video uploads.
    LongVideo,
    /// Short vertical clips.
    ShortVideo,
    /// Live broadcasts.
    Livestream,
    /// Photo and carousel feeds.
    PhotoFeed,
    /// Audio shows.
    Podcast,
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::LongVideo,
        Self::ShortVideo,
        Self::Livestream,
        Self::PhotoFeed,
        Self::Podcast,
    ];
}

impl core::fmt::Display for Platform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LongVideo => write!(f, "long_video"),
            Self::ShortVideo => write!(f, "short_video"),
            Self::Livestream => write!(f, "livestream"),
            Self::PhotoFeed => write!(f, "photo_feed"),
            Self::Podcast => write!(f, "podcast"),
        }
    }
}

/// The content category an agent produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// Let's-plays, esports, speedruns.
    Gaming,
    /// Sketches and stand-up.
    Comedy,
    /// Makeup and fashion.
    Beauty,
    /// Explainers and tutorials.
    Education,
    /// Performances and covers.
    Music,
    /// Workouts and nutrition.
    Fitness,
    /// Gadget reviews and programming.
    Tech,
    /// Vlogs and daily life.
    Lifestyle,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Gaming,
        Self::Comedy,
        Self::Beauty,
        Self::Education,
        Self::Music,
        Self::Fitness,
        Self::Tech,
        Self::Lifestyle,
    ];
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Gaming => write!(f, "gaming"),
            Self::Comedy => write!(f, "comedy"),
            Self::Beauty => write!(f, "beauty"),
            Self::Education => write!(f, "education"),
            Self::Music => write!(f, "music"),
            Self::Fitness => write!(f, "fitness"),
            Self::Tech => write!(f, "tech"),
            Self::Lifestyle => write!(f, "lifestyle"),
        }
    }
}

/// One of the fixed numeric traits every agent carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TraitKind {
    /// On-camera presence.
    Charisma,
    /// Regularity of output.
    Consistency,
    /// Appetite for experimental content.
    Risk,
    /// Production craft.
    Skill,
    /// Ability to follow platform shifts.
    Adaptability,
    /// Attachment to an employer.
    Loyalty,
    /// Ambition and work rate.
    Drive,
}

impl TraitKind {
    /// Every trait, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Charisma,
        Self::Consistency,
        Self::Risk,
        Self::Skill,
        Self::Adaptability,
        Self::Loyalty,
        Self::Drive,
    ];
}

/// A qualitative tag earned through an agent's career.
///
/// Some tags come in opposing pairs; holding one removes the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Tag {
    /// Growing fast right now.
    Rising,
    /// Losing followers week after week.
    Fading,
    /// Known for dependable output.
    Reliable,
    /// Known for unpredictable output.
    Erratic,
    /// Beloved by the audience.
    FanFavorite,
    /// Attracts backlash.
    Controversial,
    /// Five or more years in the business.
    Veteran,
    /// Returned from retirement.
    Comeback,
}

impl Tag {
    /// The mutually exclusive counterpart of this tag, if any.
    pub const fn opposite(self) -> Option<Self> {
        match self {
            Self::Rising => Some(Self::Fading),
            Self::Fading => Some(Self::Rising),
            Self::Reliable => Some(Self::Erratic),
            Self::Erratic => Some(Self::Reliable),
            Self::FanFavorite => Some(Self::Controversial),
            Self::Controversial => Some(Self::FanFavorite),
            Self::Veteran | Self::Comeback => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Agencies
// ---------------------------------------------------------------------------

/// Strategic policy of an autonomous agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AgencyStrategy {
    /// Churns the roster hard, chasing the top of the market.
    Aggressive,
    /// Holds on to talent and only cuts on long decline.
    Conservative,
    /// Specialises in one category and trims everyone outside it.
    Niche,
    /// Middle of the road.
    Balanced,
}

impl core::fmt::Display for AgencyStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Aggressive => write!(f, "aggressive"),
            Self::Conservative => write!(f, "conservative"),
            Self::Niche => write!(f, "niche"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Who makes decisions for an agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Controller {
    /// Driven by a human through an external UI; the core never releases
    /// or scouts on its behalf.
    Player,
    /// Driven by the agency decision policy each tick.
    Ai,
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

/// The template family a trend was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TrendKind {
    /// Audience moving toward or away from a platform.
    PlatformShift,
    /// A content category heating up.
    CategoryBoom,
    /// Advertising market conditions.
    Economic,
    /// Population-wide mood.
    Global,
}

/// Which agents a trend applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TrendScope {
    /// Agents publishing on the given platform.
    Platform(Platform),
    /// Agents producing the given category.
    Category(Category),
    /// Every agent.
    Global,
}

impl TrendScope {
    /// Whether an agent with this platform and category is affected.
    pub fn applies_to(self, platform: Platform, category: Category) -> bool {
        match self {
            Self::Platform(p) => p == platform,
            Self::Category(c) => c == category,
            Self::Global => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Why an agent left the active population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RetirementReason {
    /// Sustained high burnout.
    Burnout,
    /// Tiny audience in long decline.
    Irrelevance,
    /// Long career ending in decline.
    CareerDecline,
    /// Left at the top.
    GracefulExit,
    /// Aged out.
    Age,
    /// No particular reason.
    Random,
}

impl core::fmt::Display for RetirementReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Burnout => write!(f, "burnout"),
            Self::Irrelevance => write!(f, "irrelevance"),
            Self::CareerDecline => write!(f, "career_decline"),
            Self::GracefulExit => write!(f, "graceful_exit"),
            Self::Age => write!(f, "age"),
            Self::Random => write!(f, "random"),
        }
    }
}

// ---------------------------------------------------------------------------
// Negotiation
// ---------------------------------------------------------------------------

/// The counterpart's reaction to the latest offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Mood {
    /// Score of 70 or more.
    Eager,
    /// Score of 45 or more.
    Neutral,
    /// Score of 25 or more.
    Hesitant,
    /// Anything lower.
    Insulted,
}

/// Lifecycle position of a negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NegotiationStatus {
    /// Waiting for the acquirer's next offer.
    Proposing,
    /// The counterpart countered; the acquirer may offer again or take the counter.
    Countered,
    /// The round ceiling was reached; only taking the counter or withdrawing remain.
    FinalCounter,
    /// Terms agreed.
    Accepted,
    /// The counterpart walked away.
    Walked,
    /// The acquirer withdrew.
    Withdrawn,
}

impl NegotiationStatus {
    /// Whether no further moves are possible.
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Accepted | Self::Walked | Self::Withdrawn)
    }
}

/// How much of the counterpart's expectation the acquirer can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ScoutingTier {
    /// Mood only.
    Basic,
    /// Expectation as approximate ranges.
    Advanced,
    /// Exact expectation.
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_are_symmetric() {
        for tag in [
            Tag::Rising,
            Tag::Fading,
            Tag::Reliable,
            Tag::Erratic,
            Tag::FanFavorite,
            Tag::Controversial,
        ] {
            let opposite = tag.opposite();
            assert!(opposite.is_some());
            assert_eq!(opposite.and_then(Tag::opposite), Some(tag));
        }
        assert_eq!(Tag::Veteran.opposite(), None);
    }

    #[test]
    fn trend_scope_matching() {
        let scope = TrendScope::Platform(Platform::ShortVideo);
        assert!(scope.applies_to(Platform::ShortVideo, Category::Gaming));
        assert!(!scope.applies_to(Platform::Podcast, Category::Gaming));
        assert!(TrendScope::Category(Category::Tech).applies_to(Platform::Podcast, Category::Tech));
        assert!(TrendScope::Global.applies_to(Platform::LongVideo, Category::Music));
    }

    #[test]
    fn resolved_statuses() {
        assert!(NegotiationStatus::Accepted.is_resolved());
        assert!(NegotiationStatus::Walked.is_resolved());
        assert!(NegotiationStatus::Withdrawn.is_resolved());
        assert!(!NegotiationStatus::Countered.is_resolved());
        assert!(!NegotiationStatus::FinalCounter.is_resolved());
    }

    #[test]
    fn platform_serializes_snake_case() {
        let json = serde_json::to_string(&Platform::ShortVideo).ok();
        assert_eq!(json.as_deref(), Some("\"short_video\""));
    }
}
