//! Error types for the clout-agents crate.
//!
//! Model functions return typed errors rather than panicking. The
//! orchestrator treats an [`AgentError`] from a per-agent computation as a
//! reason to skip that agent for the tick, never to abort the tick.

use clout_types::Platform;

/// Errors that can occur while evaluating per-agent rules.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A floating-point intermediate was NaN or infinite.
    #[error("non-finite value in {context}")]
    NonFinite {
        /// Description of what was being computed.
        context: String,
    },

    /// An integer or decimal computation overflowed.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A weekly schedule failed validation.
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Reasons a caller-supplied weekly schedule is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// A platform entry exceeds the per-platform ceiling.
    #[error("{platform} has {hours} hours, maximum is {max}")]
    TooManyHours {
        /// The offending platform.
        platform: Platform,
        /// Hours requested.
        hours: u32,
        /// Configured ceiling.
        max: u32,
    },

    /// A working week has too few platforms at or above the minimum hours.
    #[error("{active} active platforms, at least {required} required")]
    TooFewPlatforms {
        /// Platforms that meet the minimum hours.
        active: u32,
        /// Configured minimum.
        required: u32,
    },

    /// A full-rest week also lists working hours.
    #[error("full rest week lists {hours} working hours")]
    RestWithHours {
        /// Total hours listed.
        hours: u32,
    },
}
