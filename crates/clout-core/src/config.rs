//! Configuration loading and typed config structures for the Clout simulation.
//!
//! The canonical configuration lives in `clout-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and a loader that reads and validates the file. Every section
//! and field is optional; an empty file yields the defaults.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use clout_agents::{EventTable, GrowthConfig, LifecycleConfig, NegotiationConfig, ScheduleLimits};
use clout_types::{AgencyStrategy, Category, Platform, TrendKind, TrendScope};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is unusable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `clout-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World seeding: name, seed, calendar, population, agencies.
    #[serde(default)]
    pub world: WorldConfig,

    /// Weekly growth and performance model.
    #[serde(default)]
    pub growth: GrowthConfig,

    /// Retirement, comeback, and debut.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Contract negotiation.
    #[serde(default)]
    pub negotiation: NegotiationConfig,

    /// Bounds on caller-supplied schedules.
    #[serde(default)]
    pub schedule: ScheduleLimits,

    /// Trend engine.
    #[serde(default)]
    pub trends: TrendConfig,

    /// Agency decision policy.
    #[serde(default)]
    pub agencies: AgencyPolicyConfig,

    /// Ranking and snapshot history.
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Random event table.
    #[serde(default)]
    pub events: EventTable,

    /// Run length, export path, and log filter for the engine binary.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| {
            Err(ConfigError::Invalid {
                reason: String::from(reason),
            })
        };
        if self.growth.reference_hours <= 0.0 {
            return invalid("growth.reference_hours must be positive");
        }
        if self.growth.impressions_min_multiple > self.growth.impressions_max_multiple {
            return invalid("growth.impressions_min_multiple exceeds impressions_max_multiple");
        }
        if self.lifecycle.debut_min > self.lifecycle.debut_max {
            return invalid("lifecycle.debut_min exceeds debut_max");
        }
        if self.lifecycle.debut_followers_min > self.lifecycle.debut_followers_max {
            return invalid("lifecycle.debut_followers_min exceeds debut_followers_max");
        }
        if self.negotiation.max_rounds == 0 {
            return invalid("negotiation.max_rounds must be at least 1");
        }
        if self.schedule.min_hours > self.schedule.max_hours {
            return invalid("schedule.min_hours exceeds max_hours");
        }
        if self.trends.catalog.iter().any(|t| t.duration_ticks == 0) {
            return invalid("every trend template needs a duration of at least 1 tick");
        }
        if self.agencies.roster_max == 0 {
            return invalid("agencies.roster_max must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.agencies.revenue_split) {
            return invalid("agencies.revenue_split must be within [0, 1]");
        }
        if self.ranking.history_cap == 0 {
            return invalid("ranking.history_cap must be at least 1");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// World seeding configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    pub name: String,
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Calendar date of tick 0.
    pub start_date: NaiveDate,
    /// Agents generated at seeding.
    pub initial_agents: u32,
    /// Autonomous rival agencies, processed in this order every tick.
    pub rival_agencies: Vec<AgencySeed>,
    /// The human-operated agency, if any.
    pub player_agency: Option<AgencySeed>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: "Clout".to_owned(),
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            initial_agents: 300,
            rival_agencies: vec![
                AgencySeed::rival("Apex Talent", AgencyStrategy::Aggressive, 250_000, None, None),
                AgencySeed::rival("Steadfast Management", AgencyStrategy::Conservative, 200_000, None, None),
                AgencySeed::rival(
                    "Respawn Collective",
                    AgencyStrategy::Niche,
                    150_000,
                    Some(Category::Gaming),
                    Some(Platform::Livestream),
                ),
                AgencySeed::rival("Northstar Media", AgencyStrategy::Balanced, 200_000, None, None),
            ],
            player_agency: Some(AgencySeed {
                name: "Player Agency".to_owned(),
                strategy: AgencyStrategy::Balanced,
                funds: default_agency_funds(),
                reputation: default_reputation(),
                focus_category: None,
                focus_platform: None,
                initial_roster: 0,
            }),
        }
    }
}

/// How one agency is created at seeding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgencySeed {
    /// Display name.
    pub name: String,

    /// Strategic policy.
    #[serde(default = "default_strategy")]
    pub strategy: AgencyStrategy,

    /// Starting funds.
    #[serde(default = "default_agency_funds")]
    pub funds: Decimal,

    /// Starting reputation, 0--100.
    #[serde(default = "default_reputation")]
    pub reputation: f64,

    /// Preferred category.
    #[serde(default)]
    pub focus_category: Option<Category>,

    /// Preferred platform.
    #[serde(default)]
    pub focus_platform: Option<Platform>,

    /// Agents signed at seeding.
    #[serde(default)]
    pub initial_roster: u32,
}

impl AgencySeed {
    fn rival(
        name: &str,
        strategy: AgencyStrategy,
        funds: i64,
        focus_category: Option<Category>,
        focus_platform: Option<Platform>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            strategy,
            funds: Decimal::new(funds, 0),
            reputation: default_reputation(),
            focus_category,
            focus_platform,
            initial_roster: 6,
        }
    }
}

const fn default_strategy() -> AgencyStrategy {
    AgencyStrategy::Balanced
}

fn default_agency_funds() -> Decimal {
    Decimal::new(100_000, 0)
}

const fn default_reputation() -> f64 {
    50.0
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

/// Trend engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Most trends active at once.
    pub max_active: usize,
    /// Chance per tick of starting a trend while below the cap.
    pub start_chance: f64,
    /// Templates new trends are drawn from, uniformly.
    pub catalog: Vec<TrendTemplate>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        use TrendKind::{CategoryBoom, Economic, Global, PlatformShift};
        let t = TrendTemplate::new;
        Self {
            max_active: 3,
            start_chance: 0.15,
            catalog: vec![
                t("short_video_surge", PlatformShift, TrendScope::Platform(Platform::ShortVideo), 1.4, 1.1, 6),
                t("long_video_algorithm_change", PlatformShift, TrendScope::Platform(Platform::LongVideo), 0.8, 0.9, 4),
                t("livestream_boom", PlatformShift, TrendScope::Platform(Platform::Livestream), 1.3, 1.2, 5),
                t("gaming_boom", CategoryBoom, TrendScope::Category(Category::Gaming), 1.3, 1.2, 8),
                t("new_year_fitness", CategoryBoom, TrendScope::Category(Category::Fitness), 1.5, 1.3, 4),
                t("learning_wave", CategoryBoom, TrendScope::Category(Category::Education), 1.25, 1.1, 6),
                t("ad_market_slump", Economic, TrendScope::Global, 1.0, 0.7, 8),
                t("ad_spend_boom", Economic, TrendScope::Global, 1.0, 1.4, 6),
                t("creator_hype", Global, TrendScope::Global, 1.2, 1.1, 5),
                t("platform_fatigue", Global, TrendScope::Global, 0.85, 0.95, 5),
            ],
        }
    }
}

/// A template a trend is instantiated from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendTemplate {
    /// Catalog key; at most one active trend per key.
    pub name: String,
    /// Template family.
    pub kind: TrendKind,
    /// Which agents are affected.
    pub scope: TrendScope,
    /// Multiplier on follower growth.
    pub popularity_multiplier: f64,
    /// Multiplier on revenue.
    pub revenue_multiplier: f64,
    /// Lifetime in ticks.
    pub duration_ticks: u32,
}

impl TrendTemplate {
    fn new(
        name: &str,
        kind: TrendKind,
        scope: TrendScope,
        popularity_multiplier: f64,
        revenue_multiplier: f64,
        duration_ticks: u32,
    ) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            scope,
            popularity_multiplier,
            revenue_multiplier,
            duration_ticks,
        }
    }
}

// ---------------------------------------------------------------------------
// Agencies
// ---------------------------------------------------------------------------

/// Agency decision policy configuration.
///
/// The strategy-specific knobs are prefixed with the strategy they tune.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgencyPolicyConfig {
    /// Fraction of rostered revenue the agency keeps.
    pub revenue_split: f64,
    /// Weekly hours assumed for agents without a supplied schedule.
    pub default_weekly_hours: u32,
    /// Roster size ceiling.
    pub roster_max: usize,
    /// Most signings per agency per tick.
    pub signings_per_tick: usize,
    /// Top-ranked prospects examined per tick.
    pub prospects_examined: usize,
    /// Length of contracts offered by autonomous agencies.
    pub contract_weeks: u32,
    /// Release below this fraction of the roster mean.
    pub aggressive_mean_fraction: f64,
    /// Decline streak that triggers the aggressive decline roll.
    pub aggressive_decline_streak: u32,
    /// Probability of the aggressive decline release.
    pub aggressive_decline_chance: f64,
    /// Decline streak that forces a conservative release.
    pub conservative_decline_streak: u32,
    /// Audience below which a conservative agency releases.
    pub conservative_min_followers: u64,
    /// Probability of releasing an agent outside the niche focus category.
    pub niche_off_focus_chance: f64,
    /// Decline streak that triggers the balanced decline roll.
    pub balanced_decline_streak: u32,
    /// Probability of the balanced decline release.
    pub balanced_decline_chance: f64,
    /// Condition at or above which the burnout release roll applies.
    pub burnout_release_condition: u8,
    /// Probability of the burnout release.
    pub burnout_release_chance: f64,
    /// Minimum prospect score per strategy.
    pub min_prospect_score: ProspectThresholds,
    /// Reputation change per tick: up when the roster's mean growth is positive, down otherwise.
    pub reputation_drift: f64,
}

impl Default for AgencyPolicyConfig {
    fn default() -> Self {
        Self {
            revenue_split: 0.30,
            default_weekly_hours: 20,
            roster_max: 12,
            signings_per_tick: 2,
            prospects_examined: 3,
            contract_weeks: 52,
            aggressive_mean_fraction: 0.4,
            aggressive_decline_streak: 4,
            aggressive_decline_chance: 0.3,
            conservative_decline_streak: 16,
            conservative_min_followers: 1_000,
            niche_off_focus_chance: 0.2,
            balanced_decline_streak: 8,
            balanced_decline_chance: 0.25,
            burnout_release_condition: 90,
            burnout_release_chance: 0.05,
            min_prospect_score: ProspectThresholds::default(),
            reputation_drift: 0.5,
        }
    }
}

/// Minimum prospect score an agency of each strategy will sign.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProspectThresholds {
    /// Aggressive agencies (default: 70).
    pub aggressive: f64,
    /// Conservative agencies (default: 90).
    pub conservative: f64,
    /// Niche agencies (default: 60).
    pub niche: f64,
    /// Balanced agencies (default: 80).
    pub balanced: f64,
}

impl Default for ProspectThresholds {
    fn default() -> Self {
        Self {
            aggressive: 70.0,
            conservative: 90.0,
            niche: 60.0,
            balanced: 80.0,
        }
    }
}

impl ProspectThresholds {
    /// Threshold for one strategy.
    pub const fn for_strategy(&self, strategy: AgencyStrategy) -> f64 {
        match strategy {
            AgencyStrategy::Aggressive => self.aggressive,
            AgencyStrategy::Conservative => self.conservative,
            AgencyStrategy::Niche => self.niche,
            AgencyStrategy::Balanced => self.balanced,
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking and engine
// ---------------------------------------------------------------------------

/// Ranking and snapshot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Agents listed on each snapshot's leaderboard.
    pub top_n: usize,
    /// Snapshots retained; the oldest are dropped first.
    pub history_cap: usize,
    /// News items attached to each snapshot.
    pub news_per_snapshot: usize,
    /// News items retained in the world log.
    pub news_log_cap: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 50,
            history_cap: 52,
            news_per_snapshot: 20,
            news_log_cap: 200,
        }
    }
}

/// Settings read only by the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks to run before stopping.
    pub max_ticks: u64,
    /// Where to write the final world state as JSON, if anywhere.
    pub state_output: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_ticks: 104,
            state_output: None,
            log_level: "info".to_owned(),
        }
    }
}
