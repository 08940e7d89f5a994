//! Read-only queries over the world state.

use clout_types::{Agency, AgencyId, Agent, NewsItem, RankedAgent};

use crate::error::SimError;
use crate::ranking;
use crate::store::WorldState;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Zero-based page index.
    pub page: usize,
    /// Page size requested.
    pub per_page: usize,
    /// Items across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items.
    pub const fn total_pages(&self) -> usize {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

/// Top `n` active agents by power score.
pub fn top_agents(state: &WorldState, n: usize) -> Vec<RankedAgent> {
    ranking::rank_agents(state, n)
}

/// Free agents, largest audience first (ties by id), one page at a time.
pub fn free_agents(state: &WorldState, page: usize, per_page: usize) -> Page<&Agent> {
    let mut all: Vec<&Agent> = state
        .free_agent_ids()
        .iter()
        .filter_map(|id| state.agent(*id))
        .collect();
    all.sort_by(|a, b| b.followers.cmp(&a.followers).then_with(|| a.id.cmp(&b.id)));
    let total = all.len();
    let items = all
        .into_iter()
        .skip(page.saturating_mul(per_page))
        .take(per_page)
        .collect();
    Page {
        items,
        page,
        per_page,
        total,
    }
}

/// The agents on one agency's roster, in id order.
pub fn roster(state: &WorldState, agency_id: AgencyId) -> Result<Vec<&Agent>, SimError> {
    let agency: &Agency = state
        .agency(agency_id)
        .ok_or(SimError::UnknownAgency { agency_id })?;
    Ok(agency
        .roster
        .iter()
        .filter_map(|id| state.agent(*id))
        .collect())
}

/// The `limit` most recent news items, newest first.
pub fn recent_news(state: &WorldState, limit: usize) -> Vec<&NewsItem> {
    state.news().iter().rev().take(limit).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use clout_types::{AgentId, NewsKind};

    use super::*;
    use crate::config::SimulationConfig;
    use crate::seed::seed_world;

    fn world() -> WorldState {
        let mut config = SimulationConfig::default();
        config.world.initial_agents = 50;
        seed_world(&config, &mut StdRng::seed_from_u64(17)).unwrap()
    }

    #[test]
    fn pages_cover_all_free_agents_once() {
        let state = world();
        let first = free_agents(&state, 0, 7);
        let total = first.total;
        assert_eq!(total, state.free_agent_ids().len());

        let mut seen = Vec::new();
        for page in 0..first.total_pages() {
            seen.extend(free_agents(&state, page, 7).items.iter().map(|a| a.id));
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn free_agents_sorted_by_audience() {
        let state = world();
        let page = free_agents(&state, 0, 20);
        for pair in page.items.windows(2) {
            assert!(pair[0].followers >= pair[1].followers);
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let state = world();
        let page = free_agents(&state, 1_000, 10);
        assert!(page.items.is_empty());
    }

    #[test]
    fn roster_lists_employed_agents() {
        let state = world();
        let agency = state.agencies().first().unwrap();
        let agents = roster(&state, agency.id).unwrap();
        assert_eq!(agents.len(), agency.roster.len());
        assert!(agents.iter().all(|a| a.employer == Some(agency.id)));
    }

    #[test]
    fn unknown_agency_roster_is_an_error() {
        let state = world();
        let stranger = AgencyId::generate(&mut StdRng::seed_from_u64(0));
        assert!(matches!(
            roster(&state, stranger),
            Err(SimError::UnknownAgency { .. })
        ));
    }

    #[test]
    fn recent_news_is_newest_first() {
        let mut state = world();
        let agent_id: AgentId = *state.free_agent_ids().first().unwrap();
        for tick in 1..=5 {
            state.push_news(
                NewsItem {
                    tick,
                    kind: NewsKind::Comeback { agent_id },
                },
                10,
            );
        }
        let news = recent_news(&state, 3);
        let ticks: Vec<u64> = news.iter().map(|n| n.tick).collect();
        assert_eq!(ticks, vec![5, 4, 3]);
    }
}
