//! Agency decision policy: revenue, roster evaluation, scouting and signing.
//!
//! Agencies are processed one at a time in the store's fixed order, and each
//! agency's releases and signings are visible to every agency after it in
//! the same tick. An agent released by the first agency can be signed by the
//! third.
//!
//! Player-controlled agencies only collect revenue and drift in reputation;
//! their roster decisions come from the caller.

use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use clout_agents::growth::projected_revenue;
use clout_agents::numeric::{chance, scale_money, to_f64};
use clout_agents::{GrowthConfig, signing_cost};
use clout_types::{Agency, AgencyId, AgencyStrategy, Agent, AgentId, ContractTerms};

use crate::config::AgencyPolicyConfig;
use crate::store::{SigningOutcome, WorldState};

/// A release made by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    /// The releasing agency.
    pub agency_id: AgencyId,
    /// The released agent.
    pub agent_id: AgentId,
}

/// A signing made by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signing {
    /// The signing agency.
    pub agency_id: AgencyId,
    /// The signed agent.
    pub agent_id: AgentId,
    /// Upfront payment made.
    pub upfront: Decimal,
}

/// Everything the policy did during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgencyReport {
    /// Releases in processing order.
    pub releases: Vec<Release>,
    /// Signings in processing order.
    pub signings: Vec<Signing>,
}

/// Run the policy for every agency, in order.
pub fn run_agencies(
    state: &mut WorldState,
    policy: &AgencyPolicyConfig,
    growth: &GrowthConfig,
    rng: &mut impl Rng,
) -> AgencyReport {
    let mut report = AgencyReport::default();
    let ids: Vec<AgencyId> = state.agencies.iter().map(|a| a.id).collect();

    for agency_id in ids {
        collect_revenue(state, agency_id, policy, growth);

        let autonomous = state.agency(agency_id).is_some_and(Agency::is_autonomous);
        if autonomous {
            evaluate_roster(state, agency_id, policy, rng, &mut report.releases);
            scout_and_sign(state, agency_id, policy, &mut report.signings);
        }

        drift_reputation(state, agency_id, policy);
    }

    report
}

// ---------------------------------------------------------------------------
// Revenue
// ---------------------------------------------------------------------------

/// Credit the agency with its split of its roster's revenue this tick.
///
/// Autonomous agencies project revenue from the default weekly hours on
/// each agent's own platform; player agencies take a split of what their
/// agents actually earned.
fn collect_revenue(
    state: &mut WorldState,
    agency_id: AgencyId,
    policy: &AgencyPolicyConfig,
    growth: &GrowthConfig,
) {
    let tick = state.tick();
    let Some(agency) = state.agency(agency_id) else {
        return;
    };

    let mut gross = Decimal::ZERO;
    for agent_id in &agency.roster {
        let Some(agent) = state.agent(*agent_id) else {
            continue;
        };
        let revenue = if agency.is_autonomous() {
            match projected_revenue(agent, policy.default_weekly_hours, state.trends(), growth) {
                Ok(revenue) => revenue,
                Err(e) => {
                    warn!(tick, agent_id = %agent_id, error = %e, "revenue projection failed, skipping agent");
                    continue;
                }
            }
        } else {
            agent.last_revenue
        };
        gross = gross.saturating_add(revenue);
    }
    let share = scale_money(gross, policy.revenue_split);

    if let Some(agency) = state.agencies.iter_mut().find(|a| a.id == agency_id) {
        agency.funds = agency.funds.saturating_add(share);
        agency.total_revenue = agency.total_revenue.saturating_add(share);
        agency.last_revenue = share;
    }
}

// ---------------------------------------------------------------------------
// Roster evaluation
// ---------------------------------------------------------------------------

fn evaluate_roster(
    state: &mut WorldState,
    agency_id: AgencyId,
    policy: &AgencyPolicyConfig,
    rng: &mut impl Rng,
    releases: &mut Vec<Release>,
) {
    let tick = state.tick();
    let Some(agency) = state.agency(agency_id) else {
        return;
    };
    let strategy = agency.strategy;
    let focus = agency.focus_category;
    let roster: Vec<&Agent> = agency
        .roster
        .iter()
        .filter_map(|id| state.agent(*id))
        .collect();
    let mean_followers = if roster.is_empty() {
        0.0
    } else {
        roster.iter().map(|a| to_f64(a.followers)).sum::<f64>() / to_f64(roster.len() as u64)
    };

    let mut doomed = Vec::new();
    for agent in roster {
        let by_strategy = match strategy {
            AgencyStrategy::Aggressive => {
                to_f64(agent.followers) < policy.aggressive_mean_fraction * mean_followers
                    || (agent.decline_streak >= policy.aggressive_decline_streak
                        && chance(rng, policy.aggressive_decline_chance))
            }
            AgencyStrategy::Conservative => {
                agent.decline_streak >= policy.conservative_decline_streak
                    || agent.followers < policy.conservative_min_followers
            }
            AgencyStrategy::Niche => {
                focus.is_some_and(|c| c != agent.category)
                    && chance(rng, policy.niche_off_focus_chance)
            }
            AgencyStrategy::Balanced => {
                agent.decline_streak >= policy.balanced_decline_streak
                    && chance(rng, policy.balanced_decline_chance)
            }
        };
        let released = by_strategy
            || (agent.condition >= policy.burnout_release_condition
                && chance(rng, policy.burnout_release_chance));
        if released {
            doomed.push(agent.id);
        }
    }

    for agent_id in doomed {
        match state.release(agent_id, agency_id) {
            Ok(()) => {
                debug!(tick, agency = %agency_id, agent_id = %agent_id, "agent released");
                releases.push(Release {
                    agency_id,
                    agent_id,
                });
            }
            Err(e) => warn!(tick, agency = %agency_id, agent_id = %agent_id, error = %e, "release failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scouting and signing
// ---------------------------------------------------------------------------

/// How attractive a free agent looks to `agency`.
pub fn prospect_score(agent: &Agent, agency: &Agency) -> f64 {
    let focus_category = if agency.focus_category == Some(agent.category) {
        15.0
    } else {
        0.0
    };
    let focus_platform = if agency.focus_platform == Some(agent.platform) {
        10.0
    } else {
        0.0
    };
    8.0 * to_f64(agent.followers).ln_1p()
        + focus_category
        + focus_platform
        + 3.0 * agent.traits.mean()
        + 0.1 * (100.0 - f64::from(agent.condition))
        + (200.0 * agent.last_growth_rate).min(20.0)
        - 2.0 * f64::from(agent.decline_streak)
}

/// Minimum prospect score an agency of `strategy` will sign.
pub const fn minimum_score(strategy: AgencyStrategy, policy: &AgencyPolicyConfig) -> f64 {
    policy.min_prospect_score.for_strategy(strategy)
}

fn scout_and_sign(
    state: &mut WorldState,
    agency_id: AgencyId,
    policy: &AgencyPolicyConfig,
    signings: &mut Vec<Signing>,
) {
    let tick = state.tick();
    let Some(agency) = state.agency(agency_id) else {
        return;
    };
    if agency.roster.len() >= policy.roster_max {
        return;
    }
    let threshold = minimum_score(agency.strategy, policy);

    let mut prospects: Vec<(f64, AgentId)> = state
        .free_agents
        .iter()
        .filter_map(|id| state.agent(*id))
        .filter(|a| {
            agency.strategy != AgencyStrategy::Niche
                || agency.focus_category.is_none_or(|c| c == a.category)
        })
        .map(|a| (prospect_score(a, agency), a.id))
        .filter(|(score, _)| score.is_finite())
        .collect();
    prospects.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    prospects.truncate(policy.prospects_examined);

    let mut signed = 0_usize;
    for (score, agent_id) in prospects {
        if signed >= policy.signings_per_tick {
            break;
        }
        if score < threshold {
            break;
        }
        let Some(agent) = state.agent(agent_id) else {
            continue;
        };
        let upfront = match signing_cost(agent) {
            Ok(cost) => cost,
            Err(e) => {
                warn!(tick, agent_id = %agent_id, error = %e, "signing cost failed, skipping prospect");
                continue;
            }
        };
        let terms = ContractTerms {
            upfront,
            revenue_share: policy.revenue_split,
            duration_weeks: policy.contract_weeks,
            exclusive: false,
        };
        match state.sign(agent_id, agency_id, terms, policy.roster_max) {
            Ok(SigningOutcome::Signed { .. }) => {
                signed = signed.saturating_add(1);
                signings.push(Signing {
                    agency_id,
                    agent_id,
                    upfront,
                });
            }
            Ok(SigningOutcome::CannotAfford { cost, funds }) => {
                debug!(tick, agency = %agency_id, agent_id = %agent_id, %cost, %funds, "prospect unaffordable");
            }
            Err(e) => {
                debug!(tick, agency = %agency_id, agent_id = %agent_id, error = %e, "signing skipped");
                break;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Reputation
// ---------------------------------------------------------------------------

fn drift_reputation(state: &mut WorldState, agency_id: AgencyId, policy: &AgencyPolicyConfig) {
    let Some(agency) = state.agency(agency_id) else {
        return;
    };
    let rates: Vec<f64> = agency
        .roster
        .iter()
        .filter_map(|id| state.agent(*id))
        .map(|a| a.last_growth_rate)
        .collect();
    if rates.is_empty() {
        return;
    }
    let mean = rates.iter().sum::<f64>() / to_f64(rates.len() as u64);
    let drift = if mean > 0.0 {
        policy.reputation_drift
    } else {
        -policy.reputation_drift
    };
    if let Some(agency) = state.agencies.iter_mut().find(|a| a.id == agency_id) {
        agency.reputation = (agency.reputation + drift).clamp(0.0, 100.0);
    }
}
