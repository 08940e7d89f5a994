//! The entity store: every agent, agency, trend, snapshot, and news item.
//!
//! [`WorldState`] is an explicit aggregate owned by the caller and passed by
//! reference into each phase of the tick. It carries no behaviour beyond
//! lookup, insertion, and the handful of multi-entity moves (sign, release,
//! retire, reinstate) that must keep rosters and employer fields in step.
//!
//! The whole store round-trips through serde verbatim; the random source is
//! not part of it.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use clout_agents::negotiation::validate_terms;
use clout_agents::{EffectBundle, LifecycleConfig, apply_effects, comeback, contract, retirement};
use clout_types::{
    Agency, AgencyId, Agent, AgentId, ContractTerms, NewsItem, RetirementReason, Snapshot, Trend,
};

use crate::clock::SimClock;
use crate::error::SimError;

/// Result of a signing attempt that passed input validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SigningOutcome {
    /// The agent joined the roster.
    Signed {
        /// The agent.
        agent_id: AgentId,
        /// The employer.
        agency_id: AgencyId,
        /// The agreed terms.
        terms: ContractTerms,
    },
    /// The agency's funds do not cover the upfront payment. Nothing changed.
    CannotAfford {
        /// Upfront payment asked for.
        cost: Decimal,
        /// Funds available.
        funds: Decimal,
    },
}

/// A broken cross-entity invariant found by [`WorldState::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An active agent has fewer followers than the floor.
    FollowersBelowFloor {
        /// The agent.
        agent_id: AgentId,
        /// Its follower count.
        followers: u64,
    },
    /// Condition above 100.
    ConditionOutOfRange {
        /// The agent.
        agent_id: AgentId,
        /// Its condition.
        condition: u8,
    },
    /// A trait outside its range.
    TraitOutOfRange {
        /// The agent.
        agent_id: AgentId,
    },
    /// A roster lists an agent that is missing, retired, or employed elsewhere.
    RosterMismatch {
        /// The agency.
        agency_id: AgencyId,
        /// The listed agent.
        agent_id: AgentId,
    },
    /// An agent appears on more than one roster.
    MultipleRosters {
        /// The agent.
        agent_id: AgentId,
    },
    /// An agent names an employer whose roster does not list it.
    EmployerMismatch {
        /// The agent.
        agent_id: AgentId,
        /// The employer it names.
        agency_id: AgencyId,
    },
    /// A retired agent still names an employer.
    RetiredButEmployed {
        /// The agent.
        agent_id: AgentId,
        /// The employer it names.
        agency_id: AgencyId,
    },
    /// A roster exceeds the configured maximum.
    RosterOverCapacity {
        /// The agency.
        agency_id: AgencyId,
        /// Current size.
        size: usize,
    },
    /// The free-agent set disagrees with the agents' employer fields.
    FreeSetMismatch {
        /// The agent.
        agent_id: AgentId,
    },
    /// The retired list disagrees with the agents' retirement markers.
    RetiredSetMismatch {
        /// The agent.
        agent_id: AgentId,
    },
}

/// Bounds the audit checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditLimits {
    /// Minimum followers for an active agent.
    pub follower_floor: u64,
    /// Maximum roster size.
    pub roster_max: usize,
}

/// The simulation's entire mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub(crate) clock: SimClock,
    /// Active and retired agents.
    pub(crate) agents: BTreeMap<AgentId, Agent>,
    pub(crate) free_agents: BTreeSet<AgentId>,
    /// Retired agents in retirement order.
    pub(crate) retired: Vec<AgentId>,
    /// Agencies in processing order.
    pub(crate) agencies: Vec<Agency>,
    pub(crate) trends: Vec<Trend>,
    pub(crate) history: VecDeque<Snapshot>,
    pub(crate) news: VecDeque<NewsItem>,
}

impl WorldState {
    /// An empty world at tick 0 of `clock`.
    pub const fn new(clock: SimClock) -> Self {
        Self {
            clock,
            agents: BTreeMap::new(),
            free_agents: BTreeSet::new(),
            retired: Vec::new(),
            agencies: Vec::new(),
            trends: Vec::new(),
            history: VecDeque::new(),
            news: VecDeque::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The simulation clock.
    pub const fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Look up any agent, active or retired.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Every agent, active or retired, in id order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Active agents in id order.
    pub fn active_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values().filter(|a| a.is_active())
    }

    /// Ids of active agents, in id order.
    pub fn active_agent_ids(&self) -> Vec<AgentId> {
        self.active_agents().map(|a| a.id).collect()
    }

    /// Ids of active, unsigned agents.
    pub const fn free_agent_ids(&self) -> &BTreeSet<AgentId> {
        &self.free_agents
    }

    /// Ids of retired agents, oldest retirement first.
    pub fn retired_ids(&self) -> &[AgentId] {
        &self.retired
    }

    /// All agencies in processing order.
    pub fn agencies(&self) -> &[Agency] {
        &self.agencies
    }

    /// Look up one agency.
    pub fn agency(&self, id: AgencyId) -> Option<&Agency> {
        self.agencies.iter().find(|a| a.id == id)
    }

    pub(crate) fn agency_index(&self, id: AgencyId) -> Option<usize> {
        self.agencies.iter().position(|a| a.id == id)
    }

    /// Active trends.
    pub fn trends(&self) -> &[Trend] {
        &self.trends
    }

    /// Number of active trends that boost growth.
    pub fn positive_trend_count(&self) -> u32 {
        let count = self.trends.iter().filter(|t| t.is_positive()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Snapshot history, oldest first.
    pub const fn history(&self) -> &VecDeque<Snapshot> {
        &self.history
    }

    /// The most recent snapshot.
    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.history.back()
    }

    /// News log, oldest first.
    pub const fn news(&self) -> &VecDeque<NewsItem> {
        &self.news
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Add an agent, filing it as free, rostered, or retired from its fields.
    ///
    /// A rostered agent is also added to its employer's roster when that
    /// agency is already present.
    pub fn insert_agent(&mut self, agent: Agent) {
        let id = agent.id;
        if agent.is_active() {
            self.retired.retain(|r| *r != id);
            match agent.employer {
                None => {
                    self.free_agents.insert(id);
                }
                Some(agency_id) => {
                    self.free_agents.remove(&id);
                    if let Some(agency) = self.agencies.iter_mut().find(|a| a.id == agency_id) {
                        agency.roster.insert(id);
                    }
                }
            }
        } else {
            self.free_agents.remove(&id);
            if !self.retired.contains(&id) {
                self.retired.push(id);
            }
        }
        self.agents.insert(id, agent);
    }

    /// Append an agency to the processing order.
    pub fn insert_agency(&mut self, agency: Agency) {
        self.agencies.push(agency);
    }

    // -----------------------------------------------------------------------
    // Multi-entity moves
    // -----------------------------------------------------------------------

    /// Sign a free agent to an agency under `terms`.
    ///
    /// Invalid input returns an error and insufficient funds returns
    /// [`SigningOutcome::CannotAfford`]; neither mutates anything.
    pub fn sign(
        &mut self,
        agent_id: AgentId,
        agency_id: AgencyId,
        terms: ContractTerms,
        roster_max: usize,
    ) -> Result<SigningOutcome, SimError> {
        validate_terms(&terms)?;
        let agent = self
            .agents
            .get(&agent_id)
            .ok_or(SimError::UnknownAgent { agent_id })?;
        if !agent.is_free_agent() {
            return Err(SimError::AgentNotFree { agent_id });
        }
        let index = self
            .agency_index(agency_id)
            .ok_or(SimError::UnknownAgency { agency_id })?;
        let funds = match self.agencies.get(index) {
            Some(agency) if agency.roster.len() >= roster_max => {
                return Err(SimError::RosterFull {
                    agency_id,
                    max: roster_max,
                });
            }
            Some(agency) => agency.funds,
            None => return Err(SimError::UnknownAgency { agency_id }),
        };
        if terms.upfront > funds {
            return Ok(SigningOutcome::CannotAfford {
                cost: terms.upfront,
                funds,
            });
        }

        let tick = self.clock.tick();
        let (Some(agent), Some(agency)) = (self.agents.get_mut(&agent_id), self.agencies.get_mut(index))
        else {
            return Err(SimError::UnknownAgent { agent_id });
        };
        contract::attach(agent, agency, terms, tick)?;
        self.free_agents.remove(&agent_id);
        debug!(tick, agent_id = %agent_id, agency = %agency_id, upfront = %terms.upfront, "agent signed");
        Ok(SigningOutcome::Signed {
            agent_id,
            agency_id,
            terms,
        })
    }

    /// Release a rostered agent back into the free-agent pool.
    pub fn release(&mut self, agent_id: AgentId, agency_id: AgencyId) -> Result<(), SimError> {
        let index = self
            .agency_index(agency_id)
            .ok_or(SimError::UnknownAgency { agency_id })?;
        let (Some(agent), Some(agency)) = (self.agents.get_mut(&agent_id), self.agencies.get_mut(index))
        else {
            return Err(SimError::UnknownAgent { agent_id });
        };
        if agent.employer != Some(agency_id) || !agency.roster.contains(&agent_id) {
            return Err(SimError::NotRostered {
                agent_id,
                agency_id,
            });
        }
        contract::detach(agent, agency);
        if agent.is_active() {
            self.free_agents.insert(agent_id);
        }
        Ok(())
    }

    /// Retire an active agent: detach from its employer, leave the free
    /// pool, and join the retired list. Returns the former employer.
    pub fn retire(
        &mut self,
        agent_id: AgentId,
        reason: RetirementReason,
    ) -> Result<Option<AgencyId>, SimError> {
        let tick = self.clock.tick();
        let agent = self
            .agents
            .get_mut(&agent_id)
            .ok_or(SimError::UnknownAgent { agent_id })?;
        if !agent.is_active() {
            return Err(SimError::AgentNotFree { agent_id });
        }
        let former = retirement::retire(agent, reason, tick);
        if let Some(agency_id) = former
            && let Some(agency) = self.agencies.iter_mut().find(|a| a.id == agency_id)
        {
            agency.roster.remove(&agent_id);
        }
        self.free_agents.remove(&agent_id);
        self.retired.push(agent_id);
        Ok(former)
    }

    /// Bring a retired agent back as a free agent.
    pub fn reinstate(
        &mut self,
        agent_id: AgentId,
        config: &LifecycleConfig,
        follower_floor: u64,
    ) -> Result<(), SimError> {
        let agent = self
            .agents
            .get_mut(&agent_id)
            .ok_or(SimError::UnknownAgent { agent_id })?;
        if agent.is_active() {
            return Err(SimError::AgentNotFree { agent_id });
        }
        comeback::reinstate(agent, config, follower_floor);
        self.retired.retain(|r| *r != agent_id);
        self.free_agents.insert(agent_id);
        Ok(())
    }

    /// Apply an event's effects to an agent and its employer, if any.
    pub fn apply_event(
        &mut self,
        agent_id: AgentId,
        effects: &EffectBundle,
        follower_floor: u64,
    ) -> Result<(), SimError> {
        let agent = self
            .agents
            .get_mut(&agent_id)
            .ok_or(SimError::UnknownAgent { agent_id })?;
        let employer = agent
            .employer
            .and_then(|id| self.agencies.iter_mut().find(|a| a.id == id));
        apply_effects(agent, employer, effects, follower_floor);
        Ok(())
    }

    /// Append a snapshot, dropping the oldest beyond `cap`.
    pub fn push_snapshot(&mut self, snapshot: Snapshot, cap: usize) {
        self.history.push_back(snapshot);
        while self.history.len() > cap {
            self.history.pop_front();
        }
    }

    /// Append a news item, dropping the oldest beyond `cap`.
    pub fn push_news(&mut self, item: NewsItem, cap: usize) {
        self.news.push_back(item);
        while self.news.len() > cap {
            self.news.pop_front();
        }
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// List every broken invariant without changing anything.
    pub fn audit(&self, limits: AuditLimits) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for agent in self.agents.values() {
            let agent_id = agent.id;
            if agent.is_active() && agent.followers < limits.follower_floor {
                violations.push(InvariantViolation::FollowersBelowFloor {
                    agent_id,
                    followers: agent.followers,
                });
            }
            if agent.condition > 100 {
                violations.push(InvariantViolation::ConditionOutOfRange {
                    agent_id,
                    condition: agent.condition,
                });
            }
            let mut traits = agent.traits;
            if traits.clamp_all() {
                violations.push(InvariantViolation::TraitOutOfRange { agent_id });
            }
            if agent.is_free_agent() != self.free_agents.contains(&agent_id) {
                violations.push(InvariantViolation::FreeSetMismatch { agent_id });
            }
            if agent.is_active() == self.retired.contains(&agent_id) {
                violations.push(InvariantViolation::RetiredSetMismatch { agent_id });
            }
            if !agent.is_active()
                && let Some(agency_id) = agent.employer
            {
                violations.push(InvariantViolation::RetiredButEmployed {
                    agent_id,
                    agency_id,
                });
            }
            if agent.is_active()
                && let Some(agency_id) = agent.employer
                && !self
                    .agency(agency_id)
                    .is_some_and(|a| a.roster.contains(&agent_id))
            {
                violations.push(InvariantViolation::EmployerMismatch {
                    agent_id,
                    agency_id,
                });
            }
        }
        for id in &self.free_agents {
            if !self.agents.contains_key(id) {
                violations.push(InvariantViolation::FreeSetMismatch { agent_id: *id });
            }
        }

        let mut rostered = BTreeSet::new();
        for agency in &self.agencies {
            if agency.roster.len() > limits.roster_max {
                violations.push(InvariantViolation::RosterOverCapacity {
                    agency_id: agency.id,
                    size: agency.roster.len(),
                });
            }
            for agent_id in &agency.roster {
                let consistent = self
                    .agents
                    .get(agent_id)
                    .is_some_and(|a| a.is_active() && a.employer == Some(agency.id));
                if !consistent {
                    violations.push(InvariantViolation::RosterMismatch {
                        agency_id: agency.id,
                        agent_id: *agent_id,
                    });
                }
                if !rostered.insert(*agent_id) {
                    violations.push(InvariantViolation::MultipleRosters {
                        agent_id: *agent_id,
                    });
                }
            }
        }

        violations
    }

    /// Clamp and reconcile the store so that [`audit`](Self::audit) comes
    /// back clean. Every repair is logged at `error!`. Returns the number
    /// of repairs made.
    pub fn repair_invariants(&mut self, limits: AuditLimits) -> usize {
        let tick = self.clock.tick();
        let mut repairs = 0_usize;

        for agent in self.agents.values_mut() {
            if agent.is_active() && agent.followers < limits.follower_floor {
                error!(tick, agent_id = %agent.id, followers = agent.followers, "followers below floor, clamping");
                agent.followers = limits.follower_floor;
                repairs = repairs.saturating_add(1);
            }
            if agent.condition > 100 {
                error!(tick, agent_id = %agent.id, condition = agent.condition, "condition out of range, clamping");
                agent.condition = 100;
                repairs = repairs.saturating_add(1);
            }
            if agent.traits.clamp_all() {
                error!(tick, agent_id = %agent.id, "trait out of range, clamping");
                repairs = repairs.saturating_add(1);
            }
            if !agent.is_active() && agent.employer.is_some() {
                error!(tick, agent_id = %agent.id, "retired agent still employed, detaching");
                agent.employer = None;
                agent.contract = None;
                repairs = repairs.saturating_add(1);
            }
        }

        // Rosters: first agency in processing order keeps a contested agent.
        let mut claimed = BTreeSet::new();
        for agency in &mut self.agencies {
            let mut dropped = Vec::new();
            for agent_id in &agency.roster {
                let consistent = self
                    .agents
                    .get(agent_id)
                    .is_some_and(|a| a.is_active() && a.employer == Some(agency.id));
                if !consistent || claimed.contains(agent_id) {
                    dropped.push(*agent_id);
                } else {
                    claimed.insert(*agent_id);
                }
            }
            let excess = agency
                .roster
                .len()
                .saturating_sub(dropped.len())
                .saturating_sub(limits.roster_max);
            let overflow: Vec<AgentId> = agency
                .roster
                .iter()
                .rev()
                .filter(|id| !dropped.contains(id))
                .take(excess)
                .copied()
                .collect();
            for agent_id in &overflow {
                claimed.remove(agent_id);
                if let Some(agent) = self.agents.get_mut(agent_id) {
                    agent.employer = None;
                    agent.contract = None;
                }
            }
            for agent_id in dropped.iter().chain(&overflow) {
                error!(tick, agency = %agency.id, agent_id = %agent_id, "roster entry inconsistent, removing");
                agency.roster.remove(agent_id);
                repairs = repairs.saturating_add(1);
            }
        }

        for agent in self.agents.values_mut() {
            if let Some(agency_id) = agent.employer
                && !claimed.contains(&agent.id)
            {
                error!(tick, agent_id = %agent.id, agency = %agency_id, "employer does not roster agent, freeing");
                agent.employer = None;
                agent.contract = None;
                repairs = repairs.saturating_add(1);
            }
        }

        let free: BTreeSet<AgentId> = self
            .agents
            .values()
            .filter(|a| a.is_free_agent())
            .map(|a| a.id)
            .collect();
        if free != self.free_agents {
            error!(tick, "free-agent set out of sync, rebuilding");
            self.free_agents = free;
            repairs = repairs.saturating_add(1);
        }

        let agents = &self.agents;
        let before = self.retired.len();
        let mut seen = BTreeSet::new();
        self.retired
            .retain(|id| agents.get(id).is_some_and(|a| !a.is_active()) && seen.insert(*id));
        let mut changed = self.retired.len() != before;
        for agent in agents.values().filter(|a| !a.is_active()) {
            if !seen.contains(&agent.id) {
                self.retired.push(agent.id);
                changed = true;
            }
        }
        if changed {
            error!(tick, "retired list out of sync, rebuilding");
            repairs = repairs.saturating_add(1);
        }

        repairs
    }
}
