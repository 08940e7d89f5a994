//! Error types for the simulation façade.

use clout_types::{AgencyId, AgentId};

/// Errors returned by [`Simulation`](crate::Simulation) and [`WorldState`](crate::WorldState)
/// operations driven by the caller.
///
/// Every variant is raised before any state is mutated.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No agent with this id exists.
    #[error("unknown agent {agent_id}")]
    UnknownAgent {
        /// The missing agent.
        agent_id: AgentId,
    },

    /// No agency with this id exists.
    #[error("unknown agency {agency_id}")]
    UnknownAgency {
        /// The missing agency.
        agency_id: AgencyId,
    },

    /// The agent is retired or already signed.
    #[error("agent {agent_id} is not a free agent")]
    AgentNotFree {
        /// The agent.
        agent_id: AgentId,
    },

    /// The agency's roster is at capacity.
    #[error("agency {agency_id} roster is full ({max} agents)")]
    RosterFull {
        /// The agency.
        agency_id: AgencyId,
        /// Configured ceiling.
        max: usize,
    },

    /// The agent is not on this agency's roster.
    #[error("agent {agent_id} is not rostered by agency {agency_id}")]
    NotRostered {
        /// The agent.
        agent_id: AgentId,
        /// The agency.
        agency_id: AgencyId,
    },

    /// A negotiation was misused.
    #[error("negotiation error: {source}")]
    Negotiation {
        /// The underlying negotiation error.
        #[from]
        source: clout_agents::NegotiationError,
    },

    /// A per-agent computation failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: clout_agents::AgentError,
    },

    /// Configuration was unusable.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: crate::clock::ClockError,
    },
}
