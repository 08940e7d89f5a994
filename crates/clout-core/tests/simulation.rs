//! End-to-end tests over the public simulation API.
//!
//! These drive whole weeks through [`Simulation`] and check the properties
//! that must hold across the world after every tick, plus a few scenarios
//! that exercise the store and trend engine directly.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use clout_agents::{EmptyCatalog, LifecycleConfig};
use clout_agents::debut::generate_agent;
use clout_core::clock::SimClock;
use clout_core::config::{TrendConfig, TrendTemplate};
use clout_core::ranking::{TickChanges, build_snapshot};
use clout_core::store::AuditLimits;
use clout_core::trends::advance_trends;
use clout_core::{Simulation, SimulationConfig, SigningOutcome, WorldState};
use clout_types::{
    ContractTerms, RetirementReason, Tag, Trend, TrendId, TrendKind, TrendScope, WeeklySchedule,
};

fn small_config(seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.seed = seed;
    config.world.initial_agents = 120;
    config
}

fn limits(config: &SimulationConfig) -> AuditLimits {
    AuditLimits {
        follower_floor: config.growth.follower_floor,
        roster_max: config.agencies.roster_max,
    }
}

fn run(config: SimulationConfig, ticks: u64) -> Simulation {
    let mut sim = Simulation::from_config(config).unwrap();
    for _ in 0..ticks {
        sim.advance_tick(&BTreeMap::new()).unwrap();
    }
    sim
}

fn terms(upfront: i64) -> ContractTerms {
    ContractTerms {
        upfront: Decimal::new(upfront, 0),
        revenue_share: 0.3,
        duration_weeks: 52,
        exclusive: false,
    }
}

// ---------------------------------------------------------------------------
// Whole-world properties
// ---------------------------------------------------------------------------

#[test]
fn world_stays_consistent_across_a_year() {
    let config = small_config(42);
    let limits = limits(&config);
    let max_trends = config.trends.max_active;
    let mut sim = Simulation::from_config(config).unwrap();

    for expected_tick in 1..=52 {
        let result = sim.advance_tick(&BTreeMap::new()).unwrap();
        assert_eq!(result.tick, expected_tick);
        assert_eq!(result.repairs, 0, "tick {expected_tick} needed repairs");

        let state = sim.state();
        assert!(state.audit(limits).is_empty());
        assert!(state.trends().len() <= max_trends);
        for agent in state.active_agents() {
            assert!(agent.followers >= limits.follower_floor);
            assert!(agent.condition <= 100);
        }
        for agency in state.agencies() {
            assert!(agency.funds >= Decimal::ZERO);
            assert!((0.0..=100.0).contains(&agency.reputation));
            assert!(agency.roster.len() <= limits.roster_max);
        }
    }
}

#[test]
fn every_agent_has_at_most_one_employer() {
    let sim = run(small_config(7), 20);
    let state = sim.state();
    let mut seen = BTreeSet::new();
    for agency in state.agencies() {
        for id in &agency.roster {
            assert!(seen.insert(*id), "{id} appears on two rosters");
            assert_eq!(state.agent(*id).unwrap().employer, Some(agency.id));
        }
    }
    for id in state.free_agent_ids() {
        assert!(!seen.contains(id));
        assert!(state.agent(*id).unwrap().is_free_agent());
    }
}

#[test]
fn retired_agents_never_appear_in_rankings() {
    let sim = run(small_config(11), 30);
    let state = sim.state();
    let snapshot = state.latest_snapshot().unwrap();
    for ranked in &snapshot.top_agents {
        assert!(state.agent(ranked.agent_id).unwrap().is_active());
    }
    for id in state.retired_ids() {
        assert!(!state.agent(*id).unwrap().is_active());
    }
}

#[test]
fn history_is_capped_and_ordered() {
    let mut config = small_config(3);
    config.ranking.history_cap = 8;
    let sim = run(config, 20);
    let ticks: Vec<u64> = sim.state().history().iter().map(|s| s.tick).collect();
    assert_eq!(ticks, (13..=20).collect::<Vec<u64>>());
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_seed_gives_byte_identical_worlds() {
    let a = run(small_config(99), 15);
    let b = run(small_config(99), 15);
    let json_a = serde_json::to_string(a.state()).unwrap();
    let json_b = serde_json::to_string(b.state()).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn world_state_survives_json_round_trip() {
    let sim = run(small_config(5), 6);
    let json = serde_json::to_string(sim.state()).unwrap();
    let restored: WorldState = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, sim.state());
}

#[test]
fn restored_world_keeps_its_calendar() {
    let mut sim = Simulation::from_config(small_config(21)).unwrap();
    for _ in 0..4 {
        sim.advance_tick(&BTreeMap::new()).unwrap();
    }
    let json = serde_json::to_string(sim.state()).unwrap();
    let restored: WorldState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.tick(), 4);
    assert_eq!(
        restored.clock().date().unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 29).unwrap()
    );
}

#[test]
fn snapshot_building_is_pure() {
    let sim = run(small_config(8), 5);
    let config = &sim.config().ranking;
    let a = build_snapshot(sim.state(), TickChanges::default(), config).unwrap();
    let b = build_snapshot(sim.state(), TickChanges::default(), config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.top_agents, sim.latest_snapshot().unwrap().top_agents);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn unaffordable_signing_changes_nothing() {
    let mut sim = Simulation::from_config(small_config(13)).unwrap();
    let player = sim.state().agencies().last().unwrap().id;
    let agent_id = *sim.state().free_agent_ids().first().unwrap();
    let before = sim.state().clone();

    let outcome = sim.sign_agent(agent_id, player, terms(10_000_000)).unwrap();
    assert!(matches!(outcome, SigningOutcome::CannotAfford { .. }));
    assert_eq!(sim.state(), &before);
}

#[test]
fn player_signing_then_release_round_trips_membership() {
    let mut sim = Simulation::from_config(small_config(17)).unwrap();
    let player = sim.state().agencies().last().unwrap().id;
    let agent_id = *sim.state().free_agent_ids().first().unwrap();
    let funds_before = sim.agency(player).unwrap().funds;

    let outcome = sim.sign_agent(agent_id, player, terms(5_000)).unwrap();
    assert!(matches!(outcome, SigningOutcome::Signed { .. }));
    assert_eq!(
        Some(sim.agency(player).unwrap().funds),
        funds_before.checked_sub(Decimal::new(5_000, 0))
    );
    assert_eq!(sim.roster(player).unwrap().len(), 1);
    assert!(!sim.state().free_agent_ids().contains(&agent_id));

    sim.release_agent(agent_id, player).unwrap();
    assert!(sim.roster(player).unwrap().is_empty());
    assert!(sim.state().free_agent_ids().contains(&agent_id));
    assert!(sim.agent(agent_id).unwrap().contract.is_none());
    assert_eq!(sim.recent_news(2).len(), 2);
}

/// A config with no agencies and no retirements, for single-agent scenarios.
fn quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.rival_agencies.clear();
    config.world.player_agency = None;
    let lifecycle = &mut config.lifecycle;
    lifecycle.burnout_probability = 0.0;
    lifecycle.irrelevance_probability = 0.0;
    lifecycle.decline_probability = 0.0;
    lifecycle.graceful_probability = 0.0;
    lifecycle.age_probability_per_year = 0.0;
    lifecycle.baseline_probability = 0.0;
    lifecycle.baseline_per_career_year = 0.0;
    lifecycle.baseline_cap = 0.0;
    config
}

fn empty_world() -> WorldState {
    WorldState::new(SimClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
}

#[test]
fn resting_agent_recovers_thirty_condition() {
    let config = quiet_config();
    let mut rng = StdRng::seed_from_u64(23);
    let mut world = empty_world();
    let mut agent = generate_agent(0, &config.lifecycle, &mut rng);
    agent.condition = 95;
    agent.traits.consistency = 9;
    agent.followers = 50_000;
    let agent_id = agent.id;
    world.insert_agent(agent);

    let mut sim = Simulation::new(config, world).with_catalog(Box::new(EmptyCatalog));
    let mut schedules = BTreeMap::new();
    schedules.insert(agent_id, WeeklySchedule::rest());
    sim.advance_tick(&schedules).unwrap();

    let agent = sim.agent(agent_id).unwrap();
    assert!(agent.is_active());
    assert_eq!(agent.condition, 65);
    assert!(agent.last_revenue.is_zero());
    assert_eq!(agent.last_impressions, 0);
    assert_eq!(agent.followers, 50_000);
}

#[test]
fn retired_agent_returns_once_the_wait_is_served() {
    let mut config = quiet_config();
    config.lifecycle.comeback_probability = 1.0;
    let wait = config.lifecycle.comeback_min_ticks;
    let mut rng = StdRng::seed_from_u64(37);
    let mut world = empty_world();
    let mut agent = generate_agent(0, &config.lifecycle, &mut rng);
    agent.peak_followers = 2_000_000;
    let agent_id = agent.id;
    world.insert_agent(agent);
    world.retire(agent_id, RetirementReason::Burnout).unwrap();

    let mut sim = Simulation::new(config, world).with_catalog(Box::new(EmptyCatalog));
    for _ in 1..wait {
        let result = sim.advance_tick(&BTreeMap::new()).unwrap();
        assert!(result.comebacks.is_empty(), "returned early at tick {}", result.tick);
        assert!(!sim.agent(agent_id).unwrap().is_active());
    }

    let result = sim.advance_tick(&BTreeMap::new()).unwrap();
    assert_eq!(result.tick, wait);
    assert_eq!(result.comebacks, vec![agent_id]);
    let free = sim.free_agents(0, usize::MAX);
    assert!(free.items.iter().any(|a| a.id == agent_id));
    let agent = sim.agent(agent_id).unwrap();
    assert_eq!(agent.followers, 600_000);
    assert_eq!(agent.condition, 0);
    assert!(agent.has_tag(Tag::Comeback));
    assert!(sim.state().retired_ids().is_empty());
}

#[test]
fn comeback_restores_a_fraction_of_peak() {
    let mut rng = StdRng::seed_from_u64(31);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut world = WorldState::new(SimClock::new(start));
    let lifecycle = LifecycleConfig {
        comeback_probability: 1.0,
        ..LifecycleConfig::default()
    };

    let mut big = generate_agent(0, &lifecycle, &mut rng);
    big.followers = 800_000;
    big.peak_followers = 2_000_000;
    big.condition = 80;
    let big_id = big.id;
    world.insert_agent(big);

    let mut small = generate_agent(0, &lifecycle, &mut rng);
    small.peak_followers = 150;
    let small_id = small.id;
    world.insert_agent(small);

    for id in [big_id, small_id] {
        world.retire(id, RetirementReason::Burnout).unwrap();
        world.reinstate(id, &lifecycle, 100).unwrap();
    }

    let big = world.agent(big_id).unwrap();
    assert_eq!(big.followers, 600_000);
    assert_eq!(big.condition, 0);
    assert!(big.tags.contains(&Tag::Comeback));
    assert!(big.is_free_agent());

    assert_eq!(world.agent(small_id).unwrap().followers, 100);
    assert!(world.retired_ids().is_empty());
    assert_eq!(world.free_agent_ids().len(), 2);
}

#[test]
fn expiring_trend_ends_exactly_once() {
    let mut rng = StdRng::seed_from_u64(37);
    let config = TrendConfig {
        max_active: 3,
        start_chance: 0.0,
        catalog: Vec::<TrendTemplate>::new(),
    };
    let mut trends = vec![Trend {
        id: TrendId::generate(&mut rng),
        name: String::from("last_call"),
        kind: TrendKind::Global,
        scope: TrendScope::Global,
        popularity_multiplier: 1.2,
        revenue_multiplier: 1.0,
        remaining_ticks: 1,
        started_at_tick: 0,
    }];

    let first = advance_trends(&mut trends, &config, 1, &mut rng);
    assert_eq!(first.ended.len(), 1);
    assert!(trends.is_empty());

    let second = advance_trends(&mut trends, &config, 2, &mut rng);
    assert!(second.ended.is_empty());
    assert!(second.started.is_empty());
}
