//! Fixtures shared by the unit tests in this crate.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use clout_types::{Agent, AgentId, Category, Platform, TraitScores};

/// A mid-career free agent with average traits and 50 000 followers.
pub fn sample_agent() -> Agent {
    let mut rng = StdRng::seed_from_u64(7);
    Agent {
        id: AgentId::generate(&mut rng),
        name: String::from("Sample Creator"),
        platform: Platform::LongVideo,
        category: Category::Gaming,
        traits: TraitScores::uniform(5),
        followers: 50_000,
        condition: 20,
        tags: BTreeSet::new(),
        career_ticks: 10,
        peak_followers: 50_000,
        last_followers: 50_000,
        decline_streak: 0,
        burnout_streak: 0,
        employer: None,
        contract: None,
        age: 24,
        debuted_at_tick: 0,
        retired_at_tick: None,
        retirement_reason: None,
        last_growth_rate: 0.0,
        last_impressions: 0,
        last_revenue: Decimal::ZERO,
    }
}
