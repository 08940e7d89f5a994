//! World seeding from configuration.
//!
//! Builds the tick-0 world: an initial population spread across the whole
//! audience range, the rival agencies in configured order with their
//! starting rosters, and the player's agency last.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use tracing::info;

use clout_agents::debut::generate_agent;
use clout_agents::numeric::round_to_u64;
use clout_agents::tags;
use clout_types::{
    Agency, AgencyId, AgencyStrategy, AgentId, ContractTerms, Controller, TICKS_PER_YEAR,
};

use crate::clock::SimClock;
use crate::config::{AgencySeed, SimulationConfig};
use crate::error::SimError;
use crate::store::WorldState;

/// Smallest seeded audience, as a power of ten (1 000 followers).
const SEED_FOLLOWERS_MIN_EXP: f64 = 3.0;

/// Largest seeded audience, as a power of ten (about 5 000 000 followers).
const SEED_FOLLOWERS_MAX_EXP: f64 = 6.7;

/// Longest career an initial agent may already have, in ticks.
const SEED_CAREER_MAX: u32 = 400;

/// Build the tick-0 world described by `config`.
pub fn seed_world(config: &SimulationConfig, rng: &mut impl Rng) -> Result<WorldState, SimError> {
    let mut state = WorldState::new(SimClock::new(config.world.start_date));

    for _ in 0..config.world.initial_agents {
        let mut agent = generate_agent(0, &config.lifecycle, rng);
        let exponent = rng.random_range(SEED_FOLLOWERS_MIN_EXP..SEED_FOLLOWERS_MAX_EXP);
        agent.followers = round_to_u64(10_f64.powf(exponent)).max(config.growth.follower_floor);
        agent.peak_followers = agent.followers;
        agent.last_followers = agent.followers;
        agent.career_ticks = rng.random_range(0..=SEED_CAREER_MAX);
        agent.age = agent.age.saturating_add(agent.career_ticks / TICKS_PER_YEAR);
        tags::evaluate(&mut agent, &config.growth);
        state.insert_agent(agent);
    }

    for seed in &config.world.rival_agencies {
        let agency = build_agency(seed, Controller::Ai, rng);
        let agency_id = agency.id;
        state.insert_agency(agency);
        sign_initial_roster(&mut state, agency_id, seed, config, rng)?;
    }
    if let Some(seed) = &config.world.player_agency {
        let agency = build_agency(seed, Controller::Player, rng);
        state.insert_agency(agency);
    }

    info!(
        world = %config.world.name,
        seed = config.world.seed,
        agents = state.active_agents().count(),
        agencies = state.agencies().len(),
        free_agents = state.free_agent_ids().len(),
        "World seeded"
    );
    Ok(state)
}

fn build_agency(seed: &AgencySeed, controller: Controller, rng: &mut impl Rng) -> Agency {
    Agency {
        id: AgencyId::generate(rng),
        name: seed.name.clone(),
        controller,
        strategy: seed.strategy,
        funds: seed.funds.max(Decimal::ZERO),
        reputation: seed.reputation.clamp(0.0, 100.0),
        roster: BTreeSet::new(),
        focus_category: seed.focus_category,
        focus_platform: seed.focus_platform,
        total_revenue: Decimal::ZERO,
        last_revenue: Decimal::ZERO,
    }
}

/// Sign a random selection of free agents at no upfront cost.
///
/// Niche agencies only draw from their focus category.
fn sign_initial_roster(
    state: &mut WorldState,
    agency_id: AgencyId,
    seed: &AgencySeed,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Result<(), SimError> {
    let wanted = usize::try_from(seed.initial_roster)
        .unwrap_or(usize::MAX)
        .min(config.agencies.roster_max);
    let candidates: Vec<AgentId> = state
        .free_agent_ids()
        .iter()
        .filter_map(|id| state.agent(*id))
        .filter(|a| {
            seed.strategy != AgencyStrategy::Niche
                || seed.focus_category.is_none_or(|c| c == a.category)
        })
        .map(|a| a.id)
        .collect();
    let picks: Vec<AgentId> = candidates.choose_multiple(rng, wanted).copied().collect();

    let terms = ContractTerms {
        upfront: Decimal::ZERO,
        revenue_share: config.agencies.revenue_split,
        duration_weeks: config.agencies.contract_weeks.max(1),
        exclusive: false,
    };
    for agent_id in picks {
        state.sign(agent_id, agency_id, terms, config.agencies.roster_max)?;
    }
    Ok(())
}
