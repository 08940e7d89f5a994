//! Ranking and snapshot building.
//!
//! Everything here is a pure function of the store: calling it twice on an
//! unchanged world yields identical output.

use std::cmp::Ordering;

use clout_agents::numeric::{money_to_f64, to_f64};
use clout_types::{
    Agency, Agent, AgentId, NewsItem, PopulationStats, RankedAgency, RankedAgent, Snapshot,
};

use crate::clock::ClockError;
use crate::config::RankingConfig;
use crate::store::WorldState;

/// What happened this tick, for the snapshot's per-tick lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickChanges<'a> {
    /// Agents that debuted.
    pub debuted: &'a [AgentId],
    /// Agents that retired.
    pub retired: &'a [AgentId],
    /// Agents that returned from retirement.
    pub returned: &'a [AgentId],
    /// News generated this tick, oldest first.
    pub news: &'a [NewsItem],
}

/// Power score of one agent.
pub fn power_score(agent: &Agent) -> f64 {
    to_f64(agent.followers) / 1000.0
        + 5000.0 * agent.last_growth_rate
        + to_f64(agent.last_impressions) / 20_000.0
        + 10.0 * agent.traits.mean()
}

/// Score of one agency given its rostered agents.
pub fn agency_score(agency: &Agency, roster: &[&Agent]) -> f64 {
    let total_followers: f64 = roster.iter().map(|a| to_f64(a.followers)).sum();
    let mean_power = if roster.is_empty() {
        0.0
    } else {
        roster.iter().map(|a| power_score(a)).sum::<f64>() / to_f64(roster.len() as u64)
    };
    total_followers / 10_000.0
        + money_to_f64(agency.last_revenue) / 100.0
        + 2.0 * agency.reputation
        + 0.5 * mean_power
}

fn by_score_then_id<K: Ord>(a: (f64, K), b: (f64, K)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}

fn rank(index: usize) -> u32 {
    u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX)
}

/// Active agents by descending power score, ties by id, at most `limit`.
pub fn rank_agents(state: &WorldState, limit: usize) -> Vec<RankedAgent> {
    let mut scored: Vec<(f64, &Agent)> = state
        .active_agents()
        .map(|a| (power_score(a), a))
        .collect();
    scored.sort_by(|a, b| by_score_then_id((a.0, a.1.id), (b.0, b.1.id)));
    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (score, agent))| RankedAgent {
            rank: rank(i),
            agent_id: agent.id,
            name: agent.name.clone(),
            followers: agent.followers,
            score,
        })
        .collect()
}

/// Every agency by descending score, ties by id.
pub fn rank_agencies(state: &WorldState) -> Vec<RankedAgency> {
    let mut scored: Vec<(f64, &Agency, Vec<&Agent>)> = state
        .agencies()
        .iter()
        .map(|agency| {
            let roster: Vec<&Agent> = agency
                .roster
                .iter()
                .filter_map(|id| state.agent(*id))
                .collect();
            (agency_score(agency, &roster), agency, roster)
        })
        .collect();
    scored.sort_by(|a, b| by_score_then_id((a.0, a.1.id), (b.0, b.1.id)));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, agency, roster))| RankedAgency {
            rank: rank(i),
            agency_id: agency.id,
            name: agency.name.clone(),
            score,
            roster_size: u32::try_from(roster.len()).unwrap_or(u32::MAX),
            total_followers: roster.iter().fold(0_u64, |acc, a| acc.saturating_add(a.followers)),
        })
        .collect()
}

/// Aggregate population counts.
pub fn population_stats(state: &WorldState) -> PopulationStats {
    let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
    let active: Vec<&Agent> = state.active_agents().collect();
    let signed = active.iter().filter(|a| a.employer.is_some()).count();
    PopulationStats {
        active: count(active.len()),
        free_agents: count(active.len().saturating_sub(signed)),
        signed: count(signed),
        retired: count(state.agents().filter(|a| !a.is_active()).count()),
        total_followers: active.iter().fold(0_u64, |acc, a| acc.saturating_add(a.followers)),
    }
}

/// Build the snapshot for the store's current tick.
///
/// Does not touch the store; the caller appends the result to history.
pub fn build_snapshot(
    state: &WorldState,
    changes: TickChanges<'_>,
    config: &RankingConfig,
) -> Result<Snapshot, ClockError> {
    let skip = changes.news.len().saturating_sub(config.news_per_snapshot);
    Ok(Snapshot {
        tick: state.tick(),
        date: state.clock().date()?,
        top_agents: rank_agents(state, config.top_n),
        agencies: rank_agencies(state),
        population: population_stats(state),
        debuted: changes.debuted.to_vec(),
        retired: changes.retired.to_vec(),
        returned: changes.returned.to_vec(),
        active_trends: state.trends().iter().map(|t| t.id).collect(),
        news: changes.news.iter().skip(skip).cloned().collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::Decimal;

    use clout_agents::LifecycleConfig;
    use clout_agents::debut::generate_agent;
    use clout_types::{AgencyId, AgencyStrategy, ContractTerms, Controller, NewsKind, RetirementReason};

    use super::*;
    use crate::clock::SimClock;

    fn populated(agents: usize) -> WorldState {
        let mut rng = StdRng::seed_from_u64(13);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut world = WorldState::new(SimClock::new(start));
        for _ in 0..agents {
            world.insert_agent(generate_agent(0, &LifecycleConfig::default(), &mut rng));
        }
        for strategy in [AgencyStrategy::Aggressive, AgencyStrategy::Niche] {
            world.insert_agency(Agency {
                id: AgencyId::generate(&mut rng),
                name: format!("{strategy:?}"),
                controller: Controller::Ai,
                strategy,
                funds: Decimal::new(10_000, 0),
                reputation: 40.0,
                roster: BTreeSet::new(),
                focus_category: None,
                focus_platform: None,
                total_revenue: Decimal::ZERO,
                last_revenue: Decimal::ZERO,
            });
        }
        world
    }

    #[test]
    fn agents_ranked_descending_and_limited() {
        let world = populated(30);
        let top = rank_agents(&world, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top.first().unwrap().rank, 1);
        for pair in top.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn retired_agents_are_not_ranked() {
        let mut world = populated(5);
        let best = rank_agents(&world, 1).first().unwrap().agent_id;
        world.retire(best, RetirementReason::Random).unwrap();
        let top = rank_agents(&world, 5);
        assert_eq!(top.len(), 4);
        assert!(top.iter().all(|r| r.agent_id != best));
    }

    #[test]
    fn ranking_is_idempotent() {
        let world = populated(40);
        let config = RankingConfig::default();
        let a = build_snapshot(&world, TickChanges::default(), &config).unwrap();
        let b = build_snapshot(&world, TickChanges::default(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn agency_with_roster_outranks_empty_one() {
        let mut world = populated(6);
        let ids = world.active_agent_ids();
        let niche = world.agencies().last().unwrap().id;
        let terms = ContractTerms {
            upfront: Decimal::ZERO,
            revenue_share: 0.3,
            duration_weeks: 52,
            exclusive: false,
        };
        world.sign(ids[0], niche, terms, 12).unwrap();
        world.sign(ids[1], niche, terms, 12).unwrap();

        let ranked = rank_agencies(&world);
        assert_eq!(ranked.first().unwrap().agency_id, niche);
        assert_eq!(ranked.first().unwrap().roster_size, 2);
    }

    #[test]
    fn population_counts_add_up() {
        let mut world = populated(8);
        let ids = world.active_agent_ids();
        world.retire(ids[0], RetirementReason::Age).unwrap();
        let stats = population_stats(&world);
        assert_eq!(stats.active, 7);
        assert_eq!(stats.retired, 1);
        assert_eq!(stats.free_agents + stats.signed, stats.active);
    }

    #[test]
    fn snapshot_news_is_bounded_to_most_recent() {
        let world = populated(2);
        let agent_id = world.active_agent_ids()[0];
        let news: Vec<NewsItem> = (0..30)
            .map(|tick| NewsItem {
                tick,
                kind: NewsKind::Debut { agent_id },
            })
            .collect();
        let config = RankingConfig {
            news_per_snapshot: 5,
            ..RankingConfig::default()
        };
        let changes = TickChanges {
            news: &news,
            ..TickChanges::default()
        };
        let snapshot = build_snapshot(&world, changes, &config).unwrap();
        assert_eq!(snapshot.news.len(), 5);
        assert_eq!(snapshot.news.first().unwrap().tick, 25);
    }
}
