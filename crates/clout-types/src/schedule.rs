//! Weekly time allocation for a single agent.
//!
//! The presentation layer decides how a player-managed agent spends the
//! week; the core only consumes the finalized [`WeeklySchedule`]. Agents
//! without a supplied schedule run on the default allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Platform;

/// Hours per platform for one week, plus the rest and sponsorship flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeeklySchedule {
    /// Hours spent on each platform.
    pub hours: BTreeMap<Platform, u32>,
    /// Take the whole week off: large recovery, no growth, no revenue.
    pub full_rest: bool,
    /// Run sponsored content this week.
    pub sponsorship: bool,
}

impl WeeklySchedule {
    /// A week spent entirely on one platform.
    pub fn single(platform: Platform, hours: u32) -> Self {
        let mut map = BTreeMap::new();
        map.insert(platform, hours);
        Self {
            hours: map,
            full_rest: false,
            sponsorship: false,
        }
    }

    /// A full week of rest.
    pub fn rest() -> Self {
        Self {
            hours: BTreeMap::new(),
            full_rest: true,
            sponsorship: false,
        }
    }

    /// Enable sponsored content for this week.
    #[must_use]
    pub fn with_sponsorship(mut self) -> Self {
        self.sponsorship = true;
        self
    }

    /// Total hours across all platforms.
    pub fn total_hours(&self) -> u32 {
        self.hours.values().fold(0_u32, |acc, h| acc.saturating_add(*h))
    }
}
