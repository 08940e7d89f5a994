//! Random events and effect bundles.
//!
//! The core only owns the numeric side of one-off events: choosing an
//! eligible event for an agent and applying its [`EffectBundle`]. Flavor
//! text is keyed by [`ChosenEvent::key`] and rendered elsewhere.
//!
//! [`EventCatalog`] is the seam. [`EventTable`] is the built-in,
//! configuration-driven implementation; [`EmptyCatalog`] never fires.

use std::collections::BTreeMap;

use rand::{Rng, RngCore};
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clout_types::{Agency, Agent, Category, Platform, Tag, TraitKind};

use crate::numeric::{chance, round_clamped_u8, round_to_u64, to_f64};
use crate::tags::grant_tag;

/// Numeric deltas an event applies. Absent fields change nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectBundle {
    /// Added to the employer's funds; ignored for free agents.
    pub money: Option<Decimal>,
    /// Fractional follower change, e.g. `0.1` for +10 %.
    pub follower_percent: Option<f64>,
    /// Flat follower change.
    pub follower_flat: Option<i64>,
    /// Change in condition; positive is more burnout.
    pub condition: Option<i16>,
    /// Per-trait deltas.
    pub traits: BTreeMap<TraitKind, i8>,
    /// Tag granted to the agent.
    pub grant_tag: Option<Tag>,
    /// Change in the employer's reputation; ignored for free agents.
    pub reputation: Option<f64>,
}

/// Conditions an agent must meet for an entry to be eligible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRequirements {
    /// Allowed platforms; empty means any.
    pub platforms: Vec<Platform>,
    /// Allowed categories; empty means any.
    pub categories: Vec<Category>,
    /// Lowest follower count.
    pub min_followers: Option<u64>,
    /// Highest follower count.
    pub max_followers: Option<u64>,
    /// Tag the agent must hold.
    pub required_tag: Option<Tag>,
    /// Minimum value per trait.
    pub trait_minimums: BTreeMap<TraitKind, u8>,
}

impl EventRequirements {
    /// Whether `agent` satisfies every requirement.
    pub fn matches(&self, agent: &Agent) -> bool {
        (self.platforms.is_empty() || self.platforms.contains(&agent.platform))
            && (self.categories.is_empty() || self.categories.contains(&agent.category))
            && self.min_followers.is_none_or(|min| agent.followers >= min)
            && self.max_followers.is_none_or(|max| agent.followers <= max)
            && self.required_tag.is_none_or(|tag| agent.has_tag(tag))
            && self
                .trait_minimums
                .iter()
                .all(|(kind, min)| agent.traits.get(*kind) >= *min)
    }
}

/// One weighted entry of an [`EventTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    /// Stable key used for news and flavor text lookup.
    pub key: String,
    /// Relative selection weight among eligible entries.
    pub weight: u32,
    /// Eligibility filter.
    #[serde(default)]
    pub requirements: EventRequirements,
    /// Deltas applied when chosen.
    #[serde(default)]
    pub effects: EffectBundle,
}

/// An event picked for an agent this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenEvent {
    /// Entry key.
    pub key: String,
    /// Deltas to apply.
    pub effects: EffectBundle,
}

/// Source of random events.
pub trait EventCatalog {
    /// Pick zero or one eligible event for `agent`.
    ///
    /// A miss is `None`, never an error.
    fn roll_event(&self, agent: &Agent, rng: &mut dyn RngCore) -> Option<ChosenEvent>;
}

/// A catalog that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl EventCatalog for EmptyCatalog {
    fn roll_event(&self, _agent: &Agent, _rng: &mut dyn RngCore) -> Option<ChosenEvent> {
        None
    }
}

/// Weighted event table loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTable {
    /// Chance per agent per tick that any event is considered (default: 0.05).
    pub chance: f64,
    /// Candidate events.
    pub entries: Vec<EventEntry>,
}

impl Default for EventTable {
    fn default() -> Self {
        Self {
            chance: 0.05,
            entries: default_entries(),
        }
    }
}

impl EventCatalog for EventTable {
    fn roll_event(&self, agent: &Agent, rng: &mut dyn RngCore) -> Option<ChosenEvent> {
        if !chance(rng, self.chance) {
            return None;
        }
        let eligible: Vec<&EventEntry> = self
            .entries
            .iter()
            .filter(|e| e.weight > 0 && e.requirements.matches(agent))
            .collect();
        let entry = eligible.choose_weighted(rng, |e| e.weight).ok()?;
        Some(ChosenEvent {
            key: entry.key.clone(),
            effects: entry.effects.clone(),
        })
    }
}

/// Apply an effect bundle to an agent and, when present, its employer.
///
/// Followers stay at or above `follower_floor`, condition within
/// `[0, 100]`, traits within their range, funds non-negative, and
/// reputation within `[0, 100]`.
pub fn apply_effects(
    agent: &mut Agent,
    employer: Option<&mut Agency>,
    effects: &EffectBundle,
    follower_floor: u64,
) {
    let mut followers = to_f64(agent.followers);
    if let Some(pct) = effects.follower_percent
        && pct.is_finite()
    {
        followers *= 1.0 + pct;
    }
    if let Some(flat) = effects.follower_flat {
        #[allow(clippy::cast_precision_loss)]
        let flat = flat as f64;
        followers += flat;
    }
    agent.followers = round_to_u64(followers).max(follower_floor);
    agent.peak_followers = agent.peak_followers.max(agent.followers);

    if let Some(delta) = effects.condition {
        agent.condition =
            round_clamped_u8(f64::from(agent.condition) + f64::from(delta), 0, 100);
    }

    for (kind, delta) in &effects.traits {
        agent.traits.adjust(*kind, *delta);
    }

    if let Some(tag) = effects.grant_tag {
        grant_tag(&mut agent.tags, tag);
    }

    if let Some(agency) = employer {
        if let Some(money) = effects.money {
            agency.funds = agency
                .funds
                .checked_add(money)
                .unwrap_or(agency.funds)
                .max(Decimal::ZERO);
        }
        if let Some(rep) = effects.reputation
            && rep.is_finite()
        {
            agency.reputation = (agency.reputation + rep).clamp(0.0, 100.0);
        }
    }
}

fn entry(key: &str, weight: u32, requirements: EventRequirements, effects: EffectBundle) -> EventEntry {
    EventEntry {
        key: String::from(key),
        weight,
        requirements,
        effects,
    }
}

fn default_entries() -> Vec<EventEntry> {
    vec![
        entry(
            "viral_hit",
            10,
            EventRequirements::default(),
            EffectBundle {
                follower_percent: Some(0.15),
                condition: Some(5),
                ..EffectBundle::default()
            },
        ),
        entry(
            "brand_deal",
            8,
            EventRequirements {
                min_followers: Some(50_000),
                ..EventRequirements::default()
            },
            EffectBundle {
                money: Some(Decimal::new(2_500, 0)),
                reputation: Some(1.0),
                ..EffectBundle::default()
            },
        ),
        entry(
            "controversy",
            5,
            EventRequirements {
                trait_minimums: BTreeMap::from([(TraitKind::Risk, 7)]),
                ..EventRequirements::default()
            },
            EffectBundle {
                follower_percent: Some(-0.08),
                grant_tag: Some(Tag::Controversial),
                reputation: Some(-3.0),
                ..EffectBundle::default()
            },
        ),
        entry(
            "fan_meetup",
            6,
            EventRequirements {
                trait_minimums: BTreeMap::from([(TraitKind::Charisma, 7)]),
                ..EventRequirements::default()
            },
            EffectBundle {
                follower_flat: Some(1_500),
                grant_tag: Some(Tag::FanFavorite),
                ..EffectBundle::default()
            },
        ),
        entry(
            "equipment_failure",
            6,
            EventRequirements {
                platforms: vec![Platform::Livestream, Platform::LongVideo],
                ..EventRequirements::default()
            },
            EffectBundle {
                condition: Some(8),
                ..EffectBundle::default()
            },
        ),
        entry(
            "skill_workshop",
            5,
            EventRequirements::default(),
            EffectBundle {
                traits: BTreeMap::from([(TraitKind::Skill, 1)]),
                condition: Some(-5),
                ..EffectBundle::default()
            },
        ),
    ]
}
