//! The simulation façade: world state, configuration, random source, and
//! event catalog behind one owner.
//!
//! Every operation a presentation layer needs goes through [`Simulation`]:
//! advancing the week, negotiating and signing contracts, and read-only
//! queries. Negotiations live outside the façade as plain
//! [`NegotiationState`] values and are passed back in for each round, so
//! they can be suspended and resumed freely.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tracing::debug;

use clout_agents::{
    EventCatalog, ExpectationView, NegotiationError, NegotiationState, RoundOutcome,
};
use clout_types::{
    Agency, AgencyId, Agent, AgentId, ContractTerms, Mood, NegotiationId, NewsItem, NewsKind,
    RankedAgent, ScoutingTier, Snapshot, Trend, WeeklySchedule,
};

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::query::{self, Page};
use crate::seed::seed_world;
use crate::store::{SigningOutcome, WorldState};
use crate::tick::{self, TickContext, TickError, TickResult};

/// Result of one negotiation step driven through the façade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OfferOutcome {
    /// Terms agreed and the agent signed.
    Signed {
        /// The agreed terms.
        terms: ContractTerms,
    },
    /// The counterpart countered; another offer may follow.
    Countered {
        /// The counter-offer.
        counter: ContractTerms,
        /// The counterpart's mood.
        mood: Mood,
    },
    /// The round ceiling was reached; accept the counter or withdraw.
    FinalCounter {
        /// The last counter-offer.
        counter: ContractTerms,
        /// The counterpart's mood.
        mood: Mood,
    },
    /// The counterpart walked away.
    Walked {
        /// The offer's score.
        score: f64,
    },
    /// The acquirer cannot pay the upfront amount. Nothing changed.
    CannotAfford {
        /// Upfront payment asked for.
        cost: Decimal,
        /// Funds available.
        funds: Decimal,
    },
}

/// A running simulation.
pub struct Simulation {
    config: SimulationConfig,
    state: WorldState,
    rng: StdRng,
    catalog: Box<dyn EventCatalog>,
}

impl Simulation {
    /// Wrap an existing world, seeding the random source from `world.seed`.
    ///
    /// The event catalog is the configured event table.
    pub fn new(config: SimulationConfig, state: WorldState) -> Self {
        let rng = StdRng::seed_from_u64(config.world.seed);
        let catalog: Box<dyn EventCatalog> = Box::new(config.events.clone());
        Self {
            config,
            state,
            rng,
            catalog,
        }
    }

    /// Validate `config` and seed a fresh world from it.
    pub fn from_config(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.world.seed);
        let state = seed_world(&config, &mut rng)?;
        let catalog: Box<dyn EventCatalog> = Box::new(config.events.clone());
        Ok(Self {
            config,
            state,
            rng,
            catalog,
        })
    }

    /// Replace the event catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Box<dyn EventCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Active configuration.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current world state.
    pub const fn state(&self) -> &WorldState {
        &self.state
    }

    /// Give up the façade and keep the world.
    pub fn into_state(self) -> WorldState {
        self.state
    }

    // -----------------------------------------------------------------------
    // Weekly cycle
    // -----------------------------------------------------------------------

    /// Run one week. Agents without an entry in `schedules` use the default
    /// allocation.
    pub fn advance_tick(
        &mut self,
        schedules: &BTreeMap<AgentId, WeeklySchedule>,
    ) -> Result<TickResult, TickError> {
        let ctx = TickContext {
            config: &self.config,
            catalog: self.catalog.as_ref(),
        };
        tick::advance_tick(&mut self.state, ctx, schedules, &mut self.rng)
    }

    // -----------------------------------------------------------------------
    // Contracts
    // -----------------------------------------------------------------------

    /// Sign a free agent outright under `terms`.
    pub fn sign_agent(
        &mut self,
        agent_id: AgentId,
        agency_id: AgencyId,
        terms: ContractTerms,
    ) -> Result<SigningOutcome, SimError> {
        let outcome = self
            .state
            .sign(agent_id, agency_id, terms, self.config.agencies.roster_max)?;
        if let SigningOutcome::Signed { terms, .. } = outcome {
            self.record_signing(agent_id, agency_id, terms.upfront);
        }
        Ok(outcome)
    }

    /// Release a rostered agent into the free-agent pool.
    pub fn release_agent(&mut self, agent_id: AgentId, agency_id: AgencyId) -> Result<(), SimError> {
        self.state.release(agent_id, agency_id)?;
        let tick = self.state.tick();
        self.state.push_news(
            NewsItem {
                tick,
                kind: NewsKind::Release {
                    agent_id,
                    agency_id,
                },
            },
            self.config.ranking.news_log_cap,
        );
        Ok(())
    }

    /// Open a negotiation between a free agent and an agency.
    pub fn start_negotiation(
        &mut self,
        agent_id: AgentId,
        acquirer_id: AgencyId,
        scouting: ScoutingTier,
    ) -> Result<NegotiationState, SimError> {
        self.free_agent(agent_id)?;
        if self.state.agency(acquirer_id).is_none() {
            return Err(SimError::UnknownAgency {
                agency_id: acquirer_id,
            });
        }
        let id = NegotiationId::generate(&mut self.rng);
        let agent = self.free_agent(agent_id)?;
        let negotiation =
            NegotiationState::start(id, agent, acquirer_id, scouting, &self.config.negotiation)?;
        debug!(negotiation = %id, agent_id = %agent_id, agency = %acquirer_id, ?scouting, "negotiation started");
        Ok(negotiation)
    }

    /// What the acquirer can see of the counterpart's expectation.
    pub fn expectation_view(&self, negotiation: &NegotiationState) -> ExpectationView {
        negotiation.expectation_view(&self.config.negotiation)
    }

    /// Submit an offer for the current round.
    ///
    /// An unaffordable offer returns [`OfferOutcome::CannotAfford`] without
    /// consuming the round. An accepted offer signs the agent in the same
    /// call.
    pub fn submit_offer(
        &mut self,
        negotiation: &mut NegotiationState,
        terms: ContractTerms,
    ) -> Result<OfferOutcome, SimError> {
        ensure_open(negotiation)?;
        if let Some(short) = self.check_signable(negotiation, terms.upfront)? {
            return Ok(short);
        }

        match negotiation.submit_offer(terms, &self.config.negotiation)? {
            RoundOutcome::Accepted { terms, .. } => self.complete(negotiation, terms),
            RoundOutcome::Countered { counter, mood } => Ok(OfferOutcome::Countered { counter, mood }),
            RoundOutcome::FinalCounter { counter, mood } => {
                Ok(OfferOutcome::FinalCounter { counter, mood })
            }
            RoundOutcome::Walked { score } => {
                debug!(negotiation = %negotiation.id(), score, "counterpart walked away");
                Ok(OfferOutcome::Walked { score })
            }
        }
    }

    /// Accept the counterpart's latest counter-offer and sign.
    pub fn accept_counter(
        &mut self,
        negotiation: &mut NegotiationState,
    ) -> Result<OfferOutcome, SimError> {
        ensure_open(negotiation)?;
        let counter = negotiation
            .counter()
            .copied()
            .ok_or(NegotiationError::NoCounter {
                id: negotiation.id(),
            })?;
        if let Some(short) = self.check_signable(negotiation, counter.upfront)? {
            return Ok(short);
        }
        let terms = negotiation.accept_counter()?;
        self.complete(negotiation, terms)
    }

    /// Abandon a negotiation. The world is untouched.
    pub fn withdraw(negotiation: &mut NegotiationState) -> Result<(), SimError> {
        negotiation.withdraw()?;
        debug!(negotiation = %negotiation.id(), "negotiation withdrawn");
        Ok(())
    }

    fn free_agent(&self, agent_id: AgentId) -> Result<&Agent, SimError> {
        let agent = self
            .state
            .agent(agent_id)
            .ok_or(SimError::UnknownAgent { agent_id })?;
        if !agent.is_free_agent() {
            return Err(SimError::AgentNotFree { agent_id });
        }
        Ok(agent)
    }

    /// Everything a signing needs except the counterpart's consent.
    ///
    /// Returns `Some(CannotAfford)` when only the funds are short.
    fn check_signable(
        &self,
        negotiation: &NegotiationState,
        upfront: Decimal,
    ) -> Result<Option<OfferOutcome>, SimError> {
        self.free_agent(negotiation.agent_id())?;
        let agency_id = negotiation.acquirer_id();
        let agency = self
            .state
            .agency(agency_id)
            .ok_or(SimError::UnknownAgency { agency_id })?;
        let max = self.config.agencies.roster_max;
        if agency.roster.len() >= max {
            return Err(SimError::RosterFull { agency_id, max });
        }
        if upfront > agency.funds {
            return Ok(Some(OfferOutcome::CannotAfford {
                cost: upfront,
                funds: agency.funds,
            }));
        }
        Ok(None)
    }

    fn complete(
        &mut self,
        negotiation: &NegotiationState,
        terms: ContractTerms,
    ) -> Result<OfferOutcome, SimError> {
        let agent_id = negotiation.agent_id();
        let agency_id = negotiation.acquirer_id();
        match self.sign_agent(agent_id, agency_id, terms)? {
            SigningOutcome::Signed { terms, .. } => Ok(OfferOutcome::Signed { terms }),
            SigningOutcome::CannotAfford { cost, funds } => {
                Ok(OfferOutcome::CannotAfford { cost, funds })
            }
        }
    }

    fn record_signing(&mut self, agent_id: AgentId, agency_id: AgencyId, upfront: Decimal) {
        let tick = self.state.tick();
        self.state.push_news(
            NewsItem {
                tick,
                kind: NewsKind::Signing {
                    agent_id,
                    agency_id,
                    upfront,
                },
            },
            self.config.ranking.news_log_cap,
        );
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Top `n` active agents by power score.
    pub fn top_agents(&self, n: usize) -> Vec<RankedAgent> {
        query::top_agents(&self.state, n)
    }

    /// One page of free agents, largest audience first.
    pub fn free_agents(&self, page: usize, per_page: usize) -> Page<&Agent> {
        query::free_agents(&self.state, page, per_page)
    }

    /// An agency's rostered agents.
    pub fn roster(&self, agency_id: AgencyId) -> Result<Vec<&Agent>, SimError> {
        query::roster(&self.state, agency_id)
    }

    /// Trends currently in effect.
    pub fn active_trends(&self) -> &[Trend] {
        self.state.trends()
    }

    /// The `limit` most recent news items, newest first.
    pub fn recent_news(&self, limit: usize) -> Vec<&NewsItem> {
        query::recent_news(&self.state, limit)
    }

    /// One agent's current record.
    pub fn agent(&self, agent_id: AgentId) -> Option<&Agent> {
        self.state.agent(agent_id)
    }

    /// One agency's current record.
    pub fn agency(&self, agency_id: AgencyId) -> Option<&Agency> {
        self.state.agency(agency_id)
    }

    /// The most recent snapshot.
    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.state.latest_snapshot()
    }
}

const fn ensure_open(negotiation: &NegotiationState) -> Result<(), NegotiationError> {
    if negotiation.is_resolved() {
        return Err(NegotiationError::AlreadyResolved {
            id: negotiation.id(),
            status: negotiation.status(),
        });
    }
    Ok(())
}
