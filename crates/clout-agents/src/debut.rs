//! Debuts: new agents entering the population.
//!
//! Each tick rolls a small number of newcomers. Every newcomer gets fresh
//! traits (with a small chance of one standout trait), a platform drawn by
//! weight, a category drawn by its affinity to that platform, and a modest
//! starting audience.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use clout_types::{Agent, AgentId, Category, Platform, TRAIT_MAX, TraitKind, TraitScores};

use crate::config::LifecycleConfig;
use crate::numeric::chance;
use crate::profiles::{category_affinity, platform_profile};

/// Lowest value a standout trait can roll.
const STANDOUT_MIN: u8 = 9;

const FIRST_NAMES: &[&str] = &[
    "Ari", "Bex", "Cato", "Dani", "Eli", "Faye", "Gus", "Hana", "Ivo", "Jules", "Kit", "Lux",
    "Milo", "Nell", "Oki", "Pax", "Remy", "Sol", "Tova", "Uma", "Vic", "Wren", "Yuki", "Zed",
];

const HANDLES: &[&str] = &[
    "Plays", "Live", "Daily", "Cooks", "Lifts", "Talks", "Codes", "Sings", "Draws", "Vlogs",
    "Reacts", "Builds", "Glow", "Fit", "Tunes", "Labs", "Bytes", "Moves", "Shorts", "Cast",
];

/// How many agents debut this tick.
///
/// A base roll in `[debut_min, debut_max]`, plus a bonus per positive
/// trend, capped at `debut_cap`.
pub fn debut_count(positive_trends: u32, config: &LifecycleConfig, rng: &mut impl Rng) -> u32 {
    let base = if config.debut_max > config.debut_min {
        rng.random_range(config.debut_min..=config.debut_max)
    } else {
        config.debut_min
    };
    base.saturating_add(positive_trends.saturating_mul(config.debut_per_positive_trend))
        .min(config.debut_cap)
}

/// Generate one newcomer debuting at `tick`.
pub fn generate_agent(tick: u64, config: &LifecycleConfig, rng: &mut impl Rng) -> Agent {
    let id = AgentId::generate(rng);
    let name = generate_name(rng);
    let platform = pick_platform(rng);
    let category = pick_category(platform, rng);
    let traits = roll_traits(config, rng);
    let followers = range_or_min(rng, config.debut_followers_min, config.debut_followers_max);
    let age = if config.debut_age_max > config.debut_age_min {
        rng.random_range(config.debut_age_min..=config.debut_age_max)
    } else {
        config.debut_age_min
    };

    Agent {
        id,
        name,
        platform,
        category,
        traits,
        followers,
        condition: 0,
        tags: BTreeSet::new(),
        career_ticks: 0,
        peak_followers: followers,
        last_followers: followers,
        decline_streak: 0,
        burnout_streak: 0,
        employer: None,
        contract: None,
        age,
        debuted_at_tick: tick,
        retired_at_tick: None,
        retirement_reason: None,
        last_growth_rate: 0.0,
        last_impressions: 0,
        last_revenue: Decimal::ZERO,
    }
}

/// A display name built from the first-name and handle pools.
pub fn generate_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Nova");
    let handle = HANDLES.choose(rng).copied().unwrap_or("Live");
    format!("{first}{handle}")
}

fn pick_platform(rng: &mut impl Rng) -> Platform {
    Platform::ALL
        .choose_weighted(rng, |p| platform_profile(*p).debut_weight)
        .map_or(Platform::LongVideo, |p| *p)
}

fn pick_category(platform: Platform, rng: &mut impl Rng) -> Category {
    Category::ALL
        .choose_weighted(rng, |c| category_affinity(platform, *c))
        .map_or(Category::Lifestyle, |c| *c)
}

fn roll_traits(config: &LifecycleConfig, rng: &mut impl Rng) -> TraitScores {
    let ceiling = config.debut_trait_max.clamp(1, TRAIT_MAX);
    let mut traits = TraitScores::uniform(1);
    for kind in TraitKind::ALL {
        traits.set(kind, rng.random_range(1..=ceiling));
    }
    if chance(rng, config.standout_chance)
        && let Some(kind) = TraitKind::ALL.choose(rng)
    {
        traits.set(*kind, rng.random_range(STANDOUT_MIN..=TRAIT_MAX));
    }
    traits
}

fn range_or_min(rng: &mut impl Rng, min: u64, max: u64) -> u64 {
    if max > min { rng.random_range(min..=max) } else { min }
}
