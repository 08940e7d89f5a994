//! Core entity structs for the Clout simulation.
//!
//! Agents, agencies, trends, contracts, news, and the per-tick snapshot.
//! These are plain data: behaviour lives in `clout-agents` and `clout-core`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AgencyStrategy, Category, Controller, Platform, RetirementReason, Tag, TraitKind, TrendKind,
    TrendScope,
};
use crate::ids::{AgencyId, AgentId, TrendId};

/// Lowest value any numeric trait may take.
pub const TRAIT_MIN: u8 = 1;

/// Highest value any numeric trait may take.
pub const TRAIT_MAX: u8 = 10;

/// Ticks (weeks) in one simulated year.
pub const TICKS_PER_YEAR: u32 = 52;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// The fixed set of numeric traits, each within `[TRAIT_MIN, TRAIT_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TraitScores {
    /// On-camera presence.
    pub charisma: u8,
    /// Regularity of output.
    pub consistency: u8,
    /// Appetite for experimental content.
    pub risk: u8,
    /// Production craft.
    pub skill: u8,
    /// Ability to follow platform shifts.
    pub adaptability: u8,
    /// Attachment to an employer.
    pub loyalty: u8,
    /// Ambition and work rate.
    pub drive: u8,
}

impl TraitScores {
    /// Every trait at the same value, clamped to the valid range.
    pub const fn uniform(value: u8) -> Self {
        let v = clamp_trait(value);
        Self {
            charisma: v,
            consistency: v,
            risk: v,
            skill: v,
            adaptability: v,
            loyalty: v,
            drive: v,
        }
    }

    /// Read one trait.
    pub const fn get(&self, kind: TraitKind) -> u8 {
        match kind {
            TraitKind::Charisma => self.charisma,
            TraitKind::Consistency => self.consistency,
            TraitKind::Risk => self.risk,
            TraitKind::Skill => self.skill,
            TraitKind::Adaptability => self.adaptability,
            TraitKind::Loyalty => self.loyalty,
            TraitKind::Drive => self.drive,
        }
    }

    /// Overwrite one trait, clamping to the valid range.
    pub const fn set(&mut self, kind: TraitKind, value: u8) {
        let v = clamp_trait(value);
        match kind {
            TraitKind::Charisma => self.charisma = v,
            TraitKind::Consistency => self.consistency = v,
            TraitKind::Risk => self.risk = v,
            TraitKind::Skill => self.skill = v,
            TraitKind::Adaptability => self.adaptability = v,
            TraitKind::Loyalty => self.loyalty = v,
            TraitKind::Drive => self.drive = v,
        }
    }

    /// Shift one trait by a signed amount, clamping to the valid range.
    pub fn adjust(&mut self, kind: TraitKind, delta: i8) {
        let shifted = i16::from(self.get(kind)).saturating_add(i16::from(delta));
        let clamped = shifted.clamp(i16::from(TRAIT_MIN), i16::from(TRAIT_MAX));
        self.set(kind, u8::try_from(clamped).unwrap_or(TRAIT_MIN));
    }

    /// Arithmetic mean of all seven traits.
    pub fn mean(&self) -> f64 {
        let sum: u32 = TraitKind::ALL.iter().map(|k| u32::from(self.get(*k))).sum();
        f64::from(sum) / 7.0
    }

    /// Clamp every trait into the valid range. Returns `true` if anything changed.
    pub fn clamp_all(&mut self) -> bool {
        let mut changed = false;
        for kind in TraitKind::ALL {
            let current = self.get(kind);
            let clamped = clamp_trait(current);
            if clamped != current {
                self.set(kind, clamped);
                changed = true;
            }
        }
        changed
    }
}

const fn clamp_trait(value: u8) -> u8 {
    if value < TRAIT_MIN {
        TRAIT_MIN
    } else if value > TRAIT_MAX {
        TRAIT_MAX
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

/// The terms of a representation contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContractTerms {
    /// One-off payment from the acquirer to the agent at signing.
    #[ts(as = "String")]
    pub upfront: Decimal,
    /// Fraction of the agent's revenue owed to the acquirer (0.0--1.0).
    pub revenue_share: f64,
    /// Contract length in weeks.
    pub duration_weeks: u32,
    /// Whether the agent may not work with anyone else.
    pub exclusive: bool,
}

/// A signed contract held by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Contract {
    /// The employing agency.
    pub agency_id: AgencyId,
    /// Agreed terms.
    pub terms: ContractTerms,
    /// Tick the contract was signed.
    pub signed_at_tick: u64,
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A simulated creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Agent {
    /// Stable unique identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Primary platform.
    pub platform: Platform,
    /// Content category.
    pub category: Category,
    /// Numeric traits.
    pub traits: TraitScores,
    /// Current audience size. Never below the configured floor.
    pub followers: u64,
    /// Burnout, 0--100; higher is worse.
    pub condition: u8,
    /// Earned qualitative tags.
    pub tags: BTreeSet<Tag>,
    /// Ticks survived in the active population.
    pub career_ticks: u32,
    /// Highest follower count ever reached.
    pub peak_followers: u64,
    /// Follower count at the end of the previous tick.
    pub last_followers: u64,
    /// Consecutive ticks with a follower decline.
    pub decline_streak: u32,
    /// Consecutive ticks with condition at or above the high-burnout threshold.
    pub burnout_streak: u32,
    /// Current employer; `None` for a free agent.
    pub employer: Option<AgencyId>,
    /// Contract with the current employer.
    pub contract: Option<Contract>,
    /// Age in years.
    pub age: u32,
    /// Tick the agent entered the population.
    pub debuted_at_tick: u64,
    /// Tick the agent retired; `None` while active.
    pub retired_at_tick: Option<u64>,
    /// Why the agent retired, when retired.
    pub retirement_reason: Option<RetirementReason>,
    /// Growth rate over the last tick (fractional change in followers).
    pub last_growth_rate: f64,
    /// Impressions over the last tick.
    pub last_impressions: u64,
    /// Revenue over the last tick.
    #[ts(as = "String")]
    pub last_revenue: Decimal,
}

impl Agent {
    /// Whole years spent in the active population.
    pub const fn tenure_years(&self) -> u32 {
        self.career_ticks / TICKS_PER_YEAR
    }

    /// Whether the agent is still in the active population.
    pub const fn is_active(&self) -> bool {
        self.retired_at_tick.is_none()
    }

    /// Whether the agent is active and unsigned.
    pub const fn is_free_agent(&self) -> bool {
        self.is_active() && self.employer.is_none()
    }

    /// Whether the agent holds the given tag.
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

// ---------------------------------------------------------------------------
// Agency
// ---------------------------------------------------------------------------

/// An employer that rosters agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Agency {
    /// Stable unique identifier.
    pub id: AgencyId,
    /// Display name.
    pub name: String,
    /// Who decides for this agency.
    pub controller: Controller,
    /// Strategic policy used by the decision policy.
    pub strategy: AgencyStrategy,
    /// Liquid funds.
    #[ts(as = "String")]
    pub funds: Decimal,
    /// Reputation, 0--100.
    pub reputation: f64,
    /// Rostered agents; each has this agency as employer.
    pub roster: BTreeSet<AgentId>,
    /// Preferred content category, if specialised.
    pub focus_category: Option<Category>,
    /// Preferred platform, if specialised.
    pub focus_platform: Option<Platform>,
    /// Revenue accumulated since founding.
    #[ts(as = "String")]
    pub total_revenue: Decimal,
    /// Revenue received during the last tick.
    #[ts(as = "String")]
    pub last_revenue: Decimal,
}

impl Agency {
    /// Whether decisions for this agency are made by the policy.
    pub fn is_autonomous(&self) -> bool {
        self.controller == Controller::Ai
    }
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// A time-bounded global or scoped modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Trend {
    /// Stable unique identifier.
    pub id: TrendId,
    /// Catalog key of the template this trend was drawn from.
    pub name: String,
    /// Template family.
    pub kind: TrendKind,
    /// Which agents are affected.
    pub scope: TrendScope,
    /// Multiplier on follower growth.
    pub popularity_multiplier: f64,
    /// Multiplier on revenue.
    pub revenue_multiplier: f64,
    /// Ticks left before the trend ends.
    pub remaining_ticks: u32,
    /// Tick the trend started.
    pub started_at_tick: u64,
}

impl Trend {
    /// Whether the trend boosts growth.
    pub fn is_positive(&self) -> bool {
        self.popularity_multiplier > 1.0
    }
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

/// What a news item is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NewsKind {
    /// A new agent entered the population.
    Debut {
        /// The newcomer.
        agent_id: AgentId,
    },
    /// An agent retired.
    Retirement {
        /// The retiree.
        agent_id: AgentId,
        /// Why.
        reason: RetirementReason,
    },
    /// A retired agent returned.
    Comeback {
        /// The returning agent.
        agent_id: AgentId,
    },
    /// An agent crossed a follower milestone.
    Milestone {
        /// The agent.
        agent_id: AgentId,
        /// The threshold crossed.
        threshold: u64,
    },
    /// An agency signed an agent.
    Signing {
        /// The agent.
        agent_id: AgentId,
        /// The agency.
        agency_id: AgencyId,
        /// Upfront payment.
        #[ts(as = "String")]
        upfront: Decimal,
    },
    /// An agency released an agent.
    Release {
        /// The agent.
        agent_id: AgentId,
        /// The former employer.
        agency_id: AgencyId,
    },
    /// A trend began.
    TrendStarted {
        /// The trend.
        trend_id: TrendId,
        /// Catalog key.
        name: String,
    },
    /// A trend expired.
    TrendEnded {
        /// The trend.
        trend_id: TrendId,
        /// Catalog key.
        name: String,
    },
    /// A random event fired for an agent.
    Event {
        /// The agent.
        agent_id: AgentId,
        /// Catalog key of the event.
        event_key: String,
    },
}

/// A structured news entry. Flavor text is rendered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewsItem {
    /// Tick the news happened.
    pub tick: u64,
    /// What happened.
    pub kind: NewsKind,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One line of the agent leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RankedAgent {
    /// 1-based position.
    pub rank: u32,
    /// The agent.
    pub agent_id: AgentId,
    /// Display name at the time of the snapshot.
    pub name: String,
    /// Followers at the time of the snapshot.
    pub followers: u64,
    /// Power score.
    pub score: f64,
}

/// One line of the agency leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RankedAgency {
    /// 1-based position.
    pub rank: u32,
    /// The agency.
    pub agency_id: AgencyId,
    /// Display name.
    pub name: String,
    /// Agency score.
    pub score: f64,
    /// Rostered agent count.
    pub roster_size: u32,
    /// Total followers across the roster.
    pub total_followers: u64,
}

/// Aggregate population counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PopulationStats {
    /// Agents in the active population.
    pub active: u32,
    /// Active agents with no employer.
    pub free_agents: u32,
    /// Active agents with an employer.
    pub signed: u32,
    /// Retired agents.
    pub retired: u32,
    /// Sum of followers across active agents.
    pub total_followers: u64,
}

/// Immutable end-of-tick record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot {
    /// The tick this snapshot represents.
    pub tick: u64,
    /// Calendar date of the tick.
    pub date: NaiveDate,
    /// Top agents by power score.
    pub top_agents: Vec<RankedAgent>,
    /// All agencies by score.
    pub agencies: Vec<RankedAgency>,
    /// Population counts.
    pub population: PopulationStats,
    /// Agents that debuted this tick.
    pub debuted: Vec<AgentId>,
    /// Agents that retired this tick.
    pub retired: Vec<AgentId>,
    /// Agents that came back this tick.
    pub returned: Vec<AgentId>,
    /// Trends active at the end of the tick.
    pub active_trends: Vec<TrendId>,
    /// News from this tick (bounded).
    pub news: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_adjust_clamps() {
        let mut traits = TraitScores::uniform(9);
        traits.adjust(TraitKind::Skill, 5);
        assert_eq!(traits.skill, TRAIT_MAX);
        traits.adjust(TraitKind::Risk, -20);
        assert_eq!(traits.risk, TRAIT_MIN);
    }

    #[test]
    fn uniform_clamps_out_of_range() {
        assert_eq!(TraitScores::uniform(0).charisma, TRAIT_MIN);
        assert_eq!(TraitScores::uniform(42).drive, TRAIT_MAX);
    }

    #[test]
    fn trait_mean() {
        let traits = TraitScores::uniform(4);
        assert!((traits.mean() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_all_repairs() {
        let mut traits = TraitScores::uniform(5);
        traits.loyalty = 0;
        traits.skill = 14;
        assert!(traits.clamp_all());
        assert_eq!(traits.loyalty, TRAIT_MIN);
        assert_eq!(traits.skill, TRAIT_MAX);
        assert!(!traits.clamp_all());
    }
}
