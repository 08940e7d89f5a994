//! Tick cycle: the weekly orchestration loop that drives the Clout simulation.
//!
//! Each tick runs through these phases, in this order:
//!
//! 1. **Validate** -- check every caller-supplied schedule. A bad schedule
//!    rejects the whole call before anything changes.
//!
//! 2. **Trends** -- age active trends, expire finished ones, maybe start one.
//!
//! 3. **Growth** -- run the growth model for every active agent on its
//!    supplied (or default) schedule, then roll the event catalog. An agent
//!    whose computation fails is logged and skipped.
//!
//! 4. **Lifecycle** -- retirements, then comebacks, then debuts.
//!
//! 5. **Agencies** -- the decision policy for every agency, in order.
//!
//! 6. **Repair** -- clamp and reconcile any broken invariant.
//!
//! 7. **Snapshot** -- rank agents and agencies and append to history.
//!
//! Given the same state, schedules, and random stream, the result is
//! identical.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info, warn};

use clout_agents::schedule::{default_schedule, validate};
use clout_agents::{
    EventCatalog, ScheduleError, apply_week, check_retirement, comeback, compute_week, debut,
};
use clout_types::{
    AgencyId, AgentId, NewsItem, NewsKind, RetirementReason, Snapshot, Trend, WeeklySchedule,
};

use crate::agency::{self, Release, Signing};
use crate::config::SimulationConfig;
use crate::ranking::{self, TickChanges};
use crate::store::{AuditLimits, WorldState};
use crate::trends;

/// Errors that can occur during tick execution.
///
/// All of them are raised before the world changes.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: crate::clock::ClockError,
    },

    /// A schedule names an agent that does not exist.
    #[error("schedule supplied for unknown agent {agent_id}")]
    UnknownAgent {
        /// The agent.
        agent_id: AgentId,
    },

    /// A schedule names a retired agent.
    #[error("schedule supplied for retired agent {agent_id}")]
    AgentNotActive {
        /// The agent.
        agent_id: AgentId,
    },

    /// A schedule is outside the configured bounds.
    #[error("invalid schedule for {agent_id}: {source}")]
    InvalidSchedule {
        /// The agent.
        agent_id: AgentId,
        /// What is wrong with the schedule.
        source: ScheduleError,
    },
}

/// Collaborators a tick reads but never mutates.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    /// Simulation configuration.
    pub config: &'a SimulationConfig,
    /// Random event source.
    pub catalog: &'a dyn EventCatalog,
}

/// An agent crossed a follower milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// The agent.
    pub agent_id: AgentId,
    /// The threshold crossed.
    pub threshold: u64,
}

/// An agent retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retirement {
    /// The retiree.
    pub agent_id: AgentId,
    /// Why.
    pub reason: RetirementReason,
    /// The employer it left, if any.
    pub former_employer: Option<AgencyId>,
}

/// A random event fired for an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredEvent {
    /// The agent.
    pub agent_id: AgentId,
    /// Catalog key of the event.
    pub key: String,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// The tick number that was executed.
    pub tick: u64,
    /// Calendar date of the tick.
    pub date: NaiveDate,
    /// Agents that entered the population.
    pub debuts: Vec<AgentId>,
    /// Agents that retired.
    pub retirements: Vec<Retirement>,
    /// Agents that returned from retirement.
    pub comebacks: Vec<AgentId>,
    /// Trends that began.
    pub trends_started: Vec<Trend>,
    /// Trends that expired.
    pub trends_ended: Vec<Trend>,
    /// Follower milestones crossed.
    pub milestones: Vec<Milestone>,
    /// Random events that fired.
    pub events: Vec<FiredEvent>,
    /// Releases made by autonomous agencies.
    pub releases: Vec<Release>,
    /// Signings made by autonomous agencies.
    pub signings: Vec<Signing>,
    /// Agents whose growth computation failed and were left unchanged.
    pub skipped: Vec<AgentId>,
    /// Invariant repairs made at the end of the tick.
    pub repairs: usize,
    /// The snapshot appended to history.
    pub snapshot: Snapshot,
}

/// Execute one complete tick of the simulation.
pub fn advance_tick(
    state: &mut WorldState,
    ctx: TickContext<'_>,
    schedules: &BTreeMap<AgentId, WeeklySchedule>,
    rng: &mut impl Rng,
) -> Result<TickResult, TickError> {
    let config = ctx.config;

    // --- Phase 1: Validate ---
    validate_schedules(state, schedules, config)?;

    let tick = state.clock.advance()?;
    let date = state.clock.date()?;
    info!(tick, %date, active = state.active_agents().count(), "Tick started");

    let mut news: Vec<NewsItem> = Vec::new();
    let mut note = |kind: NewsKind| news.push(NewsItem { tick, kind });

    // --- Phase 2: Trends ---
    let trend_update = trends::advance_trends(&mut state.trends, &config.trends, tick, rng);
    for trend in &trend_update.ended {
        note(NewsKind::TrendEnded {
            trend_id: trend.id,
            name: trend.name.clone(),
        });
    }
    for trend in &trend_update.started {
        note(NewsKind::TrendStarted {
            trend_id: trend.id,
            name: trend.name.clone(),
        });
    }

    // --- Phase 3: Growth and events ---
    let growth = phase_growth(state, ctx, schedules, rng);
    for m in &growth.milestones {
        note(NewsKind::Milestone {
            agent_id: m.agent_id,
            threshold: m.threshold,
        });
    }
    for e in &growth.events {
        note(NewsKind::Event {
            agent_id: e.agent_id,
            event_key: e.key.clone(),
        });
    }

    // --- Phase 4: Lifecycle ---
    let lifecycle = phase_lifecycle(state, config, rng);
    for r in &lifecycle.retirements {
        note(NewsKind::Retirement {
            agent_id: r.agent_id,
            reason: r.reason,
        });
    }
    for agent_id in &lifecycle.comebacks {
        note(NewsKind::Comeback {
            agent_id: *agent_id,
        });
    }
    for agent_id in &lifecycle.debuts {
        note(NewsKind::Debut {
            agent_id: *agent_id,
        });
    }

    // --- Phase 5: Agencies ---
    let report = agency::run_agencies(state, &config.agencies, &config.growth, rng);
    for r in &report.releases {
        note(NewsKind::Release {
            agent_id: r.agent_id,
            agency_id: r.agency_id,
        });
    }
    for s in &report.signings {
        note(NewsKind::Signing {
            agent_id: s.agent_id,
            agency_id: s.agency_id,
            upfront: s.upfront,
        });
    }

    // --- Phase 6: Repair ---
    let repairs = state.repair_invariants(AuditLimits {
        follower_floor: config.growth.follower_floor,
        roster_max: config.agencies.roster_max,
    });

    // --- Phase 7: Snapshot ---
    let retired_ids: Vec<AgentId> = lifecycle.retirements.iter().map(|r| r.agent_id).collect();
    let snapshot = ranking::build_snapshot(
        state,
        TickChanges {
            debuted: &lifecycle.debuts,
            retired: &retired_ids,
            returned: &lifecycle.comebacks,
            news: &news,
        },
        &config.ranking,
    )?;
    state.push_snapshot(snapshot.clone(), config.ranking.history_cap);
    for item in news {
        state.push_news(item, config.ranking.news_log_cap);
    }

    info!(
        tick,
        debuts = lifecycle.debuts.len(),
        retirements = lifecycle.retirements.len(),
        comebacks = lifecycle.comebacks.len(),
        signings = report.signings.len(),
        releases = report.releases.len(),
        trends = state.trends.len(),
        skipped = growth.skipped.len(),
        repairs,
        "Tick completed"
    );

    Ok(TickResult {
        tick,
        date,
        debuts: lifecycle.debuts,
        retirements: lifecycle.retirements,
        comebacks: lifecycle.comebacks,
        trends_started: trend_update.started,
        trends_ended: trend_update.ended,
        milestones: growth.milestones,
        events: growth.events,
        releases: report.releases,
        signings: report.signings,
        skipped: growth.skipped,
        repairs,
        snapshot,
    })
}

/// Reject the call if any schedule is unusable.
fn validate_schedules(
    state: &WorldState,
    schedules: &BTreeMap<AgentId, WeeklySchedule>,
    config: &SimulationConfig,
) -> Result<(), TickError> {
    for (agent_id, schedule) in schedules {
        let agent = state
            .agent(*agent_id)
            .ok_or(TickError::UnknownAgent {
                agent_id: *agent_id,
            })?;
        if !agent.is_active() {
            return Err(TickError::AgentNotActive {
                agent_id: *agent_id,
            });
        }
        validate(schedule, &config.schedule).map_err(|source| TickError::InvalidSchedule {
            agent_id: *agent_id,
            source,
        })?;
    }
    Ok(())
}

/// Results of the growth phase.
#[derive(Default)]
struct GrowthPhase {
    milestones: Vec<Milestone>,
    events: Vec<FiredEvent>,
    skipped: Vec<AgentId>,
}

/// Phase 3: run the model for every active agent, then roll events.
fn phase_growth<R: Rng>(
    state: &mut WorldState,
    ctx: TickContext<'_>,
    schedules: &BTreeMap<AgentId, WeeklySchedule>,
    rng: &mut R,
) -> GrowthPhase {
    let config = ctx.config;
    let tick = state.tick();
    let mut phase = GrowthPhase::default();

    for agent_id in state.active_agent_ids() {
        let Some(agent) = state.agents.get(&agent_id) else {
            continue;
        };
        let fallback;
        let schedule = if let Some(s) = schedules.get(&agent_id) {
            s
        } else {
            fallback = default_schedule(agent.platform, config.agencies.default_weekly_hours);
            &fallback
        };

        let perf = match compute_week(
            agent,
            schedule,
            &state.trends,
            &config.growth,
            &config.schedule,
            rng,
        ) {
            Ok(perf) => perf,
            Err(e) => {
                warn!(tick, agent_id = %agent_id, error = %e, "growth computation failed, skipping agent");
                phase.skipped.push(agent_id);
                continue;
            }
        };

        let Some(agent) = state.agents.get_mut(&agent_id) else {
            continue;
        };
        let outcome = apply_week(agent, &perf, &config.growth);
        for threshold in outcome.milestones {
            debug!(tick, agent_id = %agent_id, threshold, "milestone reached");
            phase.milestones.push(Milestone {
                agent_id,
                threshold,
            });
        }
        if !outcome.tags_earned.is_empty() {
            debug!(tick, agent_id = %agent_id, tags = ?outcome.tags_earned, "tags earned");
        }

        if let Some(event) = ctx.catalog.roll_event(agent, rng) {
            if let Err(e) = state.apply_event(agent_id, &event.effects, config.growth.follower_floor) {
                warn!(tick, agent_id = %agent_id, error = %e, "event could not be applied");
                continue;
            }
            debug!(tick, agent_id = %agent_id, event = %event.key, "event fired");
            phase.events.push(FiredEvent {
                agent_id,
                key: event.key,
            });
        }
    }

    phase
}

/// Results of the lifecycle phase.
#[derive(Default)]
struct LifecyclePhase {
    retirements: Vec<Retirement>,
    comebacks: Vec<AgentId>,
    debuts: Vec<AgentId>,
}

/// Phase 4: retirements, comebacks, debuts.
fn phase_lifecycle(
    state: &mut WorldState,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> LifecyclePhase {
    let tick = state.tick();
    let lifecycle = &config.lifecycle;
    let floor = config.growth.follower_floor;
    let mut phase = LifecyclePhase::default();

    let previously_retired = state.retired_ids().to_vec();

    for agent_id in state.active_agent_ids() {
        let Some(agent) = state.agent(agent_id) else {
            continue;
        };
        let Some(reason) = check_retirement(agent, lifecycle, rng) else {
            continue;
        };
        match state.retire(agent_id, reason) {
            Ok(former_employer) => {
                debug!(tick, agent_id = %agent_id, ?reason, "agent retired");
                phase.retirements.push(Retirement {
                    agent_id,
                    reason,
                    former_employer,
                });
            }
            Err(e) => warn!(tick, agent_id = %agent_id, error = %e, "retirement failed"),
        }
    }

    for agent_id in previously_retired {
        let returns = state
            .agent(agent_id)
            .is_some_and(|a| comeback::roll_comeback(a, tick, lifecycle, rng));
        if !returns {
            continue;
        }
        match state.reinstate(agent_id, lifecycle, floor) {
            Ok(()) => {
                debug!(tick, agent_id = %agent_id, "agent returned from retirement");
                phase.comebacks.push(agent_id);
            }
            Err(e) => warn!(tick, agent_id = %agent_id, error = %e, "comeback failed"),
        }
    }

    let count = debut::debut_count(state.positive_trend_count(), lifecycle, rng);
    for _ in 0..count {
        let mut agent = debut::generate_agent(tick, lifecycle, rng);
        agent.followers = agent.followers.max(floor);
        agent.peak_followers = agent.peak_followers.max(agent.followers);
        agent.last_followers = agent.followers;
        debug!(tick, agent_id = %agent.id, name = %agent.name, "agent debuted");
        phase.debuts.push(agent.id);
        state.insert_agent(agent);
    }

    phase
}
