//! Tunable parameters for the per-agent models.
//!
//! [`GrowthConfig`] drives the weekly growth and performance model,
//! [`LifecycleConfig`] drives retirement, comeback, and debut rolls,
//! [`NegotiationConfig`] drives the contract state machine, and
//! [`ScheduleLimits`] bounds caller-supplied weekly schedules.
//!
//! Every struct deserializes from the matching section of
//! `clout-config.yaml`; missing fields fall back to [`Default`].

use serde::Deserialize;

/// Parameters of the weekly growth and performance model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Followers never drop below this value (default: 100).
    pub follower_floor: u64,

    /// Weekly hours that count as a full week on one platform (default: 20).
    pub reference_hours: f64,

    /// Cap on the hours ratio used for growth and impressions (default: 1.5).
    pub max_hours_ratio: f64,

    /// Below this audience size growth gets a flat boost (default: 10 000).
    pub small_audience_threshold: u64,

    /// Flat growth multiplier for small audiences (default: 1.5).
    pub small_audience_boost: f64,

    /// Above this audience size growth is damped logarithmically (default: 1 000 000).
    pub large_audience_threshold: u64,

    /// Strength of the logarithmic damping (default: 0.15).
    pub large_audience_log_penalty: f64,

    /// Age by which the youth bonus has fully decayed (default: 25).
    pub youth_age_threshold: u32,

    /// Youth bonus at or below `youth_min_age` (default: 0.3).
    pub youth_max_bonus: f64,

    /// Age at which the youth bonus is at its maximum (default: 16).
    pub youth_min_age: u32,

    /// Age above which the senior penalty applies (default: 35).
    pub senior_age_threshold: u32,

    /// Growth lost per year above the senior threshold (default: 0.02).
    pub senior_penalty_per_year: f64,

    /// Lowest senior multiplier (default: 0.5).
    pub senior_min_multiplier: f64,

    /// Condition above which the steeper penalty applies (default: 60).
    pub condition_threshold: u8,

    /// Growth lost per condition point up to the threshold (default: 0.003).
    pub condition_penalty_low: f64,

    /// Growth lost per condition point above the threshold (default: 0.015).
    pub condition_penalty_high: f64,

    /// Lowest condition multiplier (default: 0.1).
    pub condition_min_multiplier: f64,

    /// Revenue lost per condition point is `1 / condition_revenue_divisor` (default: 200).
    pub condition_revenue_divisor: f64,

    /// Revenue strength of hours above the reference (default: 0.5).
    pub revenue_diminishing_factor: f64,

    /// Lowest impressions multiple of followers (default: 2.0).
    pub impressions_min_multiple: f64,

    /// Highest impressions multiple of followers (default: 4.0).
    pub impressions_max_multiple: f64,

    /// Burnout gained per hour worked (default: 0.3).
    pub hours_burnout_rate: f64,

    /// Burnout gained per consistency point above the midpoint (default: 0.4).
    pub consistency_burnout_rate: f64,

    /// Burnout gained per drive point (default: 0.35).
    pub drive_burnout_rate: f64,

    /// Burnout recovered every working week (default: 8).
    pub natural_recovery: f64,

    /// Burnout recovered by a full week of rest (default: 30).
    pub full_rest_recovery: u8,

    /// Extra burnout from sponsored content (default: 2).
    pub sponsorship_burnout: f64,

    /// Growth multiplier for sponsored weeks (default: 0.95).
    pub sponsorship_growth_multiplier: f64,

    /// Revenue multiplier for sponsored weeks (default: 1.25).
    pub sponsorship_revenue_multiplier: f64,

    /// Condition at or above which the high-burnout streak counts (default: 80).
    pub high_burnout_threshold: u8,

    /// Weekly growth rate that earns the Rising tag (default: 0.05).
    pub rising_growth_rate: f64,

    /// Decline streak that earns the Fading tag (default: 6).
    pub fading_decline_streak: u32,

    /// Tenure in years that earns the Veteran tag (default: 5).
    pub veteran_years: u32,

    /// Follower counts that are announced when crossed upward.
    pub milestones: Vec<u64>,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            follower_floor: 100,
            reference_hours: 20.0,
            max_hours_ratio: 1.5,
            small_audience_threshold: 10_000,
            small_audience_boost: 1.5,
            large_audience_threshold: 1_000_000,
            large_audience_log_penalty: 0.15,
            youth_age_threshold: 25,
            youth_max_bonus: 0.3,
            youth_min_age: 16,
            senior_age_threshold: 35,
            senior_penalty_per_year: 0.02,
            senior_min_multiplier: 0.5,
            condition_threshold: 60,
            condition_penalty_low: 0.003,
            condition_penalty_high: 0.015,
            condition_min_multiplier: 0.1,
            condition_revenue_divisor: 200.0,
            revenue_diminishing_factor: 0.5,
            impressions_min_multiple: 2.0,
            impressions_max_multiple: 4.0,
            hours_burnout_rate: 0.3,
            consistency_burnout_rate: 0.4,
            drive_burnout_rate: 0.35,
            natural_recovery: 8.0,
            full_rest_recovery: 30,
            sponsorship_burnout: 2.0,
            sponsorship_growth_multiplier: 0.95,
            sponsorship_revenue_multiplier: 1.25,
            high_burnout_threshold: 80,
            rising_growth_rate: 0.05,
            fading_decline_streak: 6,
            veteran_years: 5,
            milestones: vec![10_000, 100_000, 1_000_000, 10_000_000],
        }
    }
}

/// Parameters of retirement, comeback, and debut.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// High-burnout streak that can trigger a burnout retirement (default: 8).
    pub burnout_streak_ticks: u32,
    /// Base probability of a burnout retirement (default: 0.15).
    pub burnout_probability: f64,

    /// Audience below which an agent counts as irrelevant (default: 1 000).
    pub irrelevance_followers: u64,
    /// Decline streak required for an irrelevance retirement (default: 12).
    pub irrelevance_decline_ticks: u32,
    /// Probability of an irrelevance retirement (default: 0.25).
    pub irrelevance_probability: f64,

    /// Career length that counts as long (default: 260).
    pub decline_career_ticks: u32,
    /// Decline streak required for a career-decline retirement (default: 8).
    pub decline_streak_ticks: u32,
    /// Base probability of a career-decline retirement (default: 0.05).
    pub decline_probability: f64,

    /// Audience above which a graceful exit is possible (default: 5 000 000).
    pub graceful_followers: u64,
    /// Career length required for a graceful exit (default: 520).
    pub graceful_career_ticks: u32,
    /// Base probability of a graceful exit (default: 0.005).
    pub graceful_probability: f64,

    /// Age from which age alone can retire an agent (default: 45).
    pub age_threshold: u32,
    /// Probability per year at or above `age_threshold - 1` (default: 0.002).
    pub age_probability_per_year: f64,

    /// Baseline weekly exit probability (default: 0.0005).
    pub baseline_probability: f64,
    /// Baseline added per career year, age-scaled (default: 0.0001).
    pub baseline_per_career_year: f64,
    /// Upper bound on the baseline probability (default: 0.002).
    pub baseline_cap: f64,

    /// Ticks an agent must stay retired before a comeback (default: 26).
    pub comeback_min_ticks: u64,
    /// Weekly comeback probability once eligible (default: 0.01).
    pub comeback_probability: f64,
    /// Fraction of peak followers restored on comeback (default: 0.3).
    pub comeback_peak_fraction: f64,

    /// Fewest debuts rolled per tick before trend bonuses (default: 1).
    pub debut_min: u32,
    /// Most debuts rolled per tick before trend bonuses (default: 3).
    pub debut_max: u32,
    /// Extra debuts per positive trend (default: 1).
    pub debut_per_positive_trend: u32,
    /// Hard cap on debuts per tick (default: 6).
    pub debut_cap: u32,
    /// Chance a newcomer has one standout trait (default: 0.1).
    pub standout_chance: f64,
    /// Highest rolled trait for newcomers (default: 7).
    pub debut_trait_max: u8,
    /// Lowest starting audience (default: 500).
    pub debut_followers_min: u64,
    /// Highest starting audience (default: 5 000).
    pub debut_followers_max: u64,
    /// Youngest newcomer age (default: 16).
    pub debut_age_min: u32,
    /// Oldest newcomer age (default: 30).
    pub debut_age_max: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            burnout_streak_ticks: 8,
            burnout_probability: 0.15,
            irrelevance_followers: 1_000,
            irrelevance_decline_ticks: 12,
            irrelevance_probability: 0.25,
            decline_career_ticks: 260,
            decline_streak_ticks: 8,
            decline_probability: 0.05,
            graceful_followers: 5_000_000,
            graceful_career_ticks: 520,
            graceful_probability: 0.005,
            age_threshold: 45,
            age_probability_per_year: 0.002,
            baseline_probability: 0.000_5,
            baseline_per_career_year: 0.000_1,
            baseline_cap: 0.002,
            comeback_min_ticks: 26,
            comeback_probability: 0.01,
            comeback_peak_fraction: 0.3,
            debut_min: 1,
            debut_max: 3,
            debut_per_positive_trend: 1,
            debut_cap: 6,
            standout_chance: 0.1,
            debut_trait_max: 7,
            debut_followers_min: 500,
            debut_followers_max: 5_000,
            debut_age_min: 16,
            debut_age_max: 30,
        }
    }
}

/// Parameters of the contract negotiation state machine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Round ceiling (default: 5).
    pub max_rounds: u32,
    /// Score needed to accept in round 1 (default: 65).
    pub accept_threshold: f64,
    /// Threshold reduction per round (default: 5).
    pub accept_step: f64,
    /// Walk-away floors for rounds 1, 2, ...; the last entry applies to later rounds.
    pub walk_floors: Vec<f64>,
    /// Counter-offer weight on the acquirer's offer in round 1 (default: 0.2).
    pub counter_base_weight: f64,
    /// Weight gained per round (default: 0.15).
    pub counter_weight_step: f64,
    /// Upper bound on the counter weight (default: 0.8).
    pub counter_weight_cap: f64,
    /// Round after which exclusivity follows the acquirer's offer (default: 2).
    pub exclusivity_flex_round: u32,
    /// Counterparts below this audience accept exclusivity (default: 50 000).
    pub exclusivity_follower_limit: u64,
    /// Score weight of the payment deviation (default: 30).
    pub payment_weight: f64,
    /// Score weight of the revenue-share deviation (default: 25).
    pub share_weight: f64,
    /// Score weight of the duration deviation (default: 10).
    pub duration_weight: f64,
    /// Penalty for demanding exclusivity from a counterpart who refuses it (default: 10).
    pub exclusive_penalty: f64,
    /// Bonus for offering a non-exclusive deal (default: 5).
    pub non_exclusive_bonus: f64,
    /// Relative width of the ranges shown at the advanced scouting tier (default: 0.25).
    pub scouting_range: f64,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            accept_threshold: 65.0,
            accept_step: 5.0,
            walk_floors: vec![20.0, 15.0, 10.0],
            counter_base_weight: 0.2,
            counter_weight_step: 0.15,
            counter_weight_cap: 0.8,
            exclusivity_flex_round: 2,
            exclusivity_follower_limit: 50_000,
            payment_weight: 30.0,
            share_weight: 25.0,
            duration_weight: 10.0,
            exclusive_penalty: 10.0,
            non_exclusive_bonus: 5.0,
            scouting_range: 0.25,
        }
    }
}

/// Bounds on a caller-supplied weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleLimits {
    /// Entries below this many hours are ignored (default: 2).
    pub min_hours: u32,
    /// No platform may exceed this many hours (default: 60).
    pub max_hours: u32,
    /// Working weeks need at least this many counted platforms (default: 1).
    pub min_active_platforms: u32,
}

impl Default for ScheduleLimits {
    fn default() -> Self {
        Self {
            min_hours: 2,
            max_hours: 60,
            min_active_platforms: 1,
        }
    }
}
