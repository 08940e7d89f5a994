//! Per-agent rules for the Clout simulation.
//!
//! This crate holds the logic that operates on a single agent (or a single
//! agent and its employer) without touching the world: it sits between
//! `clout-types`, which defines the data, and `clout-core`, which owns the
//! world state and the weekly cycle. Every function that needs randomness
//! takes it as a parameter.
//!
//! # Modules
//!
//! - [`config`] -- Tunable parameters ([`GrowthConfig`], [`LifecycleConfig`], [`NegotiationConfig`], [`ScheduleLimits`])
//! - [`growth`] -- Weekly growth and performance model
//! - [`schedule`] -- Validation of caller-supplied weekly schedules
//! - [`profiles`] -- Per-platform and per-category coefficients
//! - [`tags`] -- Earned qualitative tags
//! - [`retirement`] -- Ordered retirement checks
//! - [`comeback`] -- Return of retired agents
//! - [`debut`] -- Generation of new agents
//! - [`effects`] -- Random events and effect bundles ([`EventCatalog`])
//! - [`contract`] -- Signing cost, attachment, release
//! - [`negotiation`] -- Contract negotiation state machine ([`NegotiationState`])
//! - [`error`] -- Error types ([`AgentError`])

pub mod comeback;
pub mod config;
pub mod contract;
pub mod debut;
pub mod effects;
pub mod error;
pub mod growth;
pub mod negotiation;
pub mod numeric;
pub mod profiles;
pub mod retirement;
pub mod schedule;
pub mod tags;

#[cfg(test)]
mod testing;

// Re-export primary types at crate root for convenience.
pub use config::{GrowthConfig, LifecycleConfig, NegotiationConfig, ScheduleLimits};
pub use contract::signing_cost;
pub use effects::{
    ChosenEvent, EffectBundle, EmptyCatalog, EventCatalog, EventEntry, EventRequirements,
    EventTable, apply_effects,
};
pub use error::{AgentError, ScheduleError};
pub use growth::{WeekOutcome, WeekPerformance, apply_week, compute_week};
pub use negotiation::{
    Expectation, ExpectationView, NegotiationError, NegotiationState, RoundOutcome,
    evaluate_offer, generate_expectation, mood_for_score,
};
pub use retirement::check_retirement;
