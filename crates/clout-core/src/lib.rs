//! World state, weekly cycle, and orchestration for the Clout simulation.
//!
//! This crate owns the entity store and sequences one simulated week in a
//! fixed order: trends, growth, lifecycle, agencies, ranking. Everything is
//! synchronous and driven by a single seeded random source, so a run is
//! reproducible from its seed and starting state.
//!
//! # Modules
//!
//! - [`clock`] -- Weekly tick counter and calendar dates.
//! - [`config`] -- Configuration loading from `clout-config.yaml` into
//!   strongly-typed structs.
//! - [`store`] -- [`WorldState`], the entity store, with invariant audit and repair.
//! - [`trends`] -- The trend engine.
//! - [`agency`] -- The agency decision policy.
//! - [`ranking`] -- Power scores, leaderboards, and snapshots.
//! - [`tick`] -- The weekly orchestration loop.
//! - [`seed`] -- World seeding from configuration.
//! - [`query`] -- Read-only queries and pagination.
//! - [`simulation`] -- The [`Simulation`] façade.

pub mod agency;
pub mod clock;
pub mod config;
pub mod error;
pub mod query;
pub mod ranking;
pub mod seed;
pub mod simulation;
pub mod store;
pub mod tick;
pub mod trends;

pub use config::{ConfigError, SimulationConfig};
pub use error::SimError;
pub use simulation::{OfferOutcome, Simulation};
pub use store::{SigningOutcome, WorldState};
pub use tick::{TickError, TickResult};
