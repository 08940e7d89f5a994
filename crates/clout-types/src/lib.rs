//! Shared type definitions for the Clout simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the Clout workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for presentation clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Platforms, categories, traits, tags, strategies, moods
//! - [`structs`] -- Agents, agencies, trends, contracts, news, snapshots
//! - [`schedule`] -- Weekly time allocation supplied by the caller

pub mod enums;
pub mod ids;
pub mod schedule;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AgencyStrategy, Category, Controller, Mood, NegotiationStatus, Platform, RetirementReason,
    ScoutingTier, Tag, TraitKind, TrendKind, TrendScope,
};
pub use ids::{AgencyId, AgentId, NegotiationId, TrendId};
pub use schedule::WeeklySchedule;
pub use structs::{
    Agency, Agent, Contract, ContractTerms, NewsItem, NewsKind, PopulationStats, RankedAgency,
    RankedAgent, Snapshot, TICKS_PER_YEAR, TRAIT_MAX, TRAIT_MIN, TraitScores, Trend,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to the
        // `bindings/` directory relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::AgencyId::export_all();
        let _ = crate::ids::TrendId::export_all();
        let _ = crate::ids::NegotiationId::export_all();

        // Enums
        let _ = crate::enums::Platform::export_all();
        let _ = crate::enums::Category::export_all();
        let _ = crate::enums::TraitKind::export_all();
        let _ = crate::enums::Tag::export_all();
        let _ = crate::enums::AgencyStrategy::export_all();
        let _ = crate::enums::Controller::export_all();
        let _ = crate::enums::TrendKind::export_all();
        let _ = crate::enums::TrendScope::export_all();
        let _ = crate::enums::RetirementReason::export_all();
        let _ = crate::enums::Mood::export_all();
        let _ = crate::enums::NegotiationStatus::export_all();
        let _ = crate::enums::ScoutingTier::export_all();

        // Structs
        let _ = crate::structs::TraitScores::export_all();
        let _ = crate::structs::ContractTerms::export_all();
        let _ = crate::structs::Contract::export_all();
        let _ = crate::structs::Agent::export_all();
        let _ = crate::structs::Agency::export_all();
        let _ = crate::structs::Trend::export_all();
        let _ = crate::structs::NewsKind::export_all();
        let _ = crate::structs::NewsItem::export_all();
        let _ = crate::structs::RankedAgent::export_all();
        let _ = crate::structs::RankedAgency::export_all();
        let _ = crate::structs::PopulationStats::export_all();
        let _ = crate::structs::Snapshot::export_all();
        let _ = crate::schedule::WeeklySchedule::export_all();
    }
}
