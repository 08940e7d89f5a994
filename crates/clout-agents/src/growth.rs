//! Weekly growth and performance model.
//!
//! [`compute_week`] is a pure function of an agent, its schedule, the
//! active trends, and an injected random source. It returns a
//! [`WeekPerformance`] without touching the agent. [`apply_week`] then
//! writes the result back and performs the per-tick bookkeeping:
//!
//! 1. Followers, peak, and last-tick followers
//! 2. Decline and high-burnout streaks
//! 3. Career length and age
//! 4. Recent growth rate, impressions, and revenue
//! 5. Milestones crossed and tags earned
//!
//! Growth and revenue are computed per counted platform entry and summed.

use rand::Rng;
use rust_decimal::Decimal;

use clout_types::{Agent, Platform, Tag, TICKS_PER_YEAR, Trend, WeeklySchedule};

use crate::config::{GrowthConfig, ScheduleLimits};
use crate::error::AgentError;
use crate::numeric::{finite, round_clamped_u8, round_to_u64, to_f64, to_money};
use crate::profiles::{category_profile, platform_profile};
use crate::schedule::counted_entries;
use crate::tags;

/// Midpoint of the trait range; trait bonuses are centred here.
pub const TRAIT_MIDPOINT: f64 = 5.5;

/// Result of one week of the model for a single agent.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekPerformance {
    /// Followers after this week, already floored.
    pub new_followers: u64,
    /// Fractional change in followers.
    pub growth_rate: f64,
    /// Impressions earned this week.
    pub impressions: u64,
    /// Gross revenue earned this week.
    pub revenue: Decimal,
    /// Condition after this week, within `[0, 100]`.
    pub new_condition: u8,
}

/// What changed on an agent when a week was applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekOutcome {
    /// Follower milestones crossed upward this week.
    pub milestones: Vec<u64>,
    /// Tags newly earned this week.
    pub tags_earned: Vec<Tag>,
    /// Whether the agent had a birthday this week.
    pub aged: bool,
}

/// Combined trend multipliers for one platform/category pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendMultipliers {
    /// Product of popularity multipliers.
    pub popularity: f64,
    /// Product of revenue multipliers.
    pub revenue: f64,
}

/// Multiply together every active trend that reaches this agent on `platform`.
pub fn trend_multipliers(trends: &[Trend], platform: Platform, agent: &Agent) -> TrendMultipliers {
    trends
        .iter()
        .filter(|t| t.scope.applies_to(platform, agent.category))
        .fold(
            TrendMultipliers {
                popularity: 1.0,
                revenue: 1.0,
            },
            |acc, t| TrendMultipliers {
                popularity: acc.popularity * t.popularity_multiplier,
                revenue: acc.revenue * t.revenue_multiplier,
            },
        )
}

/// Compute one week for `agent` without mutating it.
pub fn compute_week(
    agent: &Agent,
    schedule: &WeeklySchedule,
    trends: &[Trend],
    config: &GrowthConfig,
    limits: &ScheduleLimits,
    rng: &mut impl Rng,
) -> Result<WeekPerformance, AgentError> {
    if schedule.full_rest {
        return Ok(WeekPerformance {
            new_followers: agent.followers.max(config.follower_floor),
            growth_rate: 0.0,
            impressions: 0,
            revenue: Decimal::ZERO,
            new_condition: agent.condition.saturating_sub(config.full_rest_recovery).min(100),
        });
    }

    let followers = to_f64(agent.followers);
    let mut follower_delta = 0.0_f64;
    let mut impressions = 0.0_f64;
    let mut revenue = 0.0_f64;
    let mut hours_worked = 0_u32;

    for (platform, hours) in counted_entries(schedule, limits) {
        hours_worked = hours_worked.saturating_add(hours);
        let hours_f = f64::from(hours);
        let profile = platform_profile(platform);
        let trend = trend_multipliers(trends, platform, agent);

        let spread = profile.variance
            * (1.0 + (f64::from(agent.traits.risk) - TRAIT_MIDPOINT) * 0.1);
        let variance = uniform(rng, -spread, spread);

        let rate = growth_rate(agent, platform, variance, trend.popularity, schedule.sponsorship, config);
        let hours_ratio = (hours_f / config.reference_hours).min(config.max_hours_ratio);
        follower_delta += followers * rate * hours_ratio;

        let multiple = uniform(rng, config.impressions_min_multiple, config.impressions_max_multiple);
        impressions += followers
            * multiple
            * profile.view_multiplier
            * (hours_f / config.reference_hours)
            * (1.0 + variance);

        revenue += entry_revenue(agent, platform, hours, trend.revenue, schedule.sponsorship, config);
    }

    let follower_delta = finite(follower_delta, "follower delta")?;
    let impressions = finite(impressions, "impressions")?;
    let revenue = to_money(revenue.max(0.0), "weekly revenue")?;

    let new_followers = round_to_u64(followers + follower_delta).max(config.follower_floor);
    let growth_rate = if agent.followers == 0 {
        0.0
    } else {
        (to_f64(new_followers) - followers) / followers
    };

    let condition_delta = condition_delta(agent, hours_worked, schedule.sponsorship, config);
    let new_condition = round_clamped_u8(
        f64::from(agent.condition) + finite(condition_delta, "condition delta")?,
        0,
        100,
    );

    Ok(WeekPerformance {
        new_followers,
        growth_rate,
        impressions: round_to_u64(impressions),
        revenue,
        new_condition,
    })
}

/// Write a computed week back onto the agent and update its history.
pub fn apply_week(agent: &mut Agent, perf: &WeekPerformance, config: &GrowthConfig) -> WeekOutcome {
    let previous = agent.followers;
    agent.last_followers = previous;
    agent.followers = perf.new_followers;
    agent.peak_followers = agent.peak_followers.max(perf.new_followers);

    if perf.new_followers < previous {
        agent.decline_streak = agent.decline_streak.saturating_add(1);
    } else if perf.new_followers > previous {
        agent.decline_streak = 0;
    }

    agent.condition = perf.new_condition;
    if agent.condition >= config.high_burnout_threshold {
        agent.burnout_streak = agent.burnout_streak.saturating_add(1);
    } else {
        agent.burnout_streak = 0;
    }

    agent.career_ticks = agent.career_ticks.saturating_add(1);
    let aged = agent.career_ticks % TICKS_PER_YEAR == 0;
    if aged {
        agent.age = agent.age.saturating_add(1);
    }

    agent.last_growth_rate = perf.growth_rate;
    agent.last_impressions = perf.impressions;
    agent.last_revenue = perf.revenue;

    let milestones = config
        .milestones
        .iter()
        .copied()
        .filter(|m| previous < *m && perf.new_followers >= *m)
        .collect();
    let tags_earned = tags::evaluate(agent, config);

    WeekOutcome {
        milestones,
        tags_earned,
        aged,
    }
}

/// Revenue for `hours` on the agent's own platform, with no sponsorship.
///
/// This is the deterministic projection agencies use for rostered agents.
pub fn projected_revenue(
    agent: &Agent,
    hours: u32,
    trends: &[Trend],
    config: &GrowthConfig,
) -> Result<Decimal, AgentError> {
    let trend = trend_multipliers(trends, agent.platform, agent);
    let revenue = entry_revenue(agent, agent.platform, hours, trend.revenue, false, config);
    to_money(revenue.max(0.0), "projected revenue")
}

/// Weekly growth rate for one platform entry before the hours scaling.
fn growth_rate(
    agent: &Agent,
    platform: Platform,
    variance: f64,
    trend_popularity: f64,
    sponsorship: bool,
    config: &GrowthConfig,
) -> f64 {
    let additive = platform_profile(platform).base_growth
        + category_profile(agent.category).base_growth
        + trait_growth_bonus(agent)
        + tags::growth_bonus(&agent.tags)
        + variance;

    let sponsorship_factor = if sponsorship {
        config.sponsorship_growth_multiplier
    } else {
        1.0
    };

    additive
        * size_factor(agent.followers, config)
        * age_factor(agent.age, config)
        * condition_factor(agent.condition, config)
        * trend_popularity
        * sponsorship_factor
}

fn trait_growth_bonus(agent: &Agent) -> f64 {
    let centred = |v: u8| f64::from(v) - TRAIT_MIDPOINT;
    let t = &agent.traits;
    0.0020 * centred(t.charisma)
        + 0.0015 * centred(t.skill)
        + 0.0010 * centred(t.consistency)
        + 0.0008 * centred(t.adaptability)
        + 0.0005 * centred(t.drive)
}

/// Small audiences grow faster; very large ones are damped logarithmically.
pub fn size_factor(followers: u64, config: &GrowthConfig) -> f64 {
    if followers < config.small_audience_threshold {
        config.small_audience_boost
    } else if followers > config.large_audience_threshold {
        let ratio = to_f64(followers) / to_f64(config.large_audience_threshold);
        1.0 / (1.0 + config.large_audience_log_penalty * ratio.ln())
    } else {
        1.0
    }
}

/// Youth bonus decaying to 1.0 by the threshold age; senior penalty above.
pub fn age_factor(age: u32, config: &GrowthConfig) -> f64 {
    if age < config.youth_age_threshold {
        let span = f64::from(config.youth_age_threshold.saturating_sub(config.youth_min_age).max(1));
        let years_young = f64::from(config.youth_age_threshold.saturating_sub(age));
        1.0 + (config.youth_max_bonus * years_young / span).min(config.youth_max_bonus)
    } else if age > config.senior_age_threshold {
        let years_over = f64::from(age.saturating_sub(config.senior_age_threshold));
        (1.0 - config.senior_penalty_per_year * years_over).max(config.senior_min_multiplier)
    } else {
        1.0
    }
}

/// Condition penalty, steeper above the threshold.
pub fn condition_factor(condition: u8, config: &GrowthConfig) -> f64 {
    let c = f64::from(condition);
    let threshold = f64::from(config.condition_threshold);
    let factor = if condition <= config.condition_threshold {
        1.0 - config.condition_penalty_low * c
    } else {
        1.0 - config.condition_penalty_low * threshold
            - config.condition_penalty_high * (c - threshold)
    };
    factor.max(config.condition_min_multiplier)
}

/// Revenue for one platform entry, as a float.
fn entry_revenue(
    agent: &Agent,
    platform: Platform,
    hours: u32,
    trend_revenue: f64,
    sponsorship: bool,
    config: &GrowthConfig,
) -> f64 {
    let hours_f = f64::from(hours);
    let hours_factor = if hours_f <= config.reference_hours {
        hours_f / config.reference_hours
    } else {
        1.0 + config.revenue_diminishing_factor
            * ((hours_f - config.reference_hours) / config.reference_hours).sqrt()
    };
    let trait_factor = 1.0
        + 0.03 * (f64::from(agent.traits.charisma) - TRAIT_MIDPOINT)
        + 0.02 * (f64::from(agent.traits.skill) - TRAIT_MIDPOINT);
    let condition_penalty =
        (1.0 - f64::from(agent.condition) / config.condition_revenue_divisor).max(0.0);
    let sponsorship_factor = if sponsorship {
        config.sponsorship_revenue_multiplier
    } else {
        1.0
    };

    to_f64(agent.followers) / 1000.0
        * platform_profile(platform).rpm
        * category_profile(agent.category).revenue_multiplier
        * hours_factor
        * trait_factor
        * condition_penalty
        * trend_revenue
        * sponsorship_factor
}

/// Burnout accumulated over a working week, net of natural recovery.
fn condition_delta(agent: &Agent, hours: u32, sponsorship: bool, config: &GrowthConfig) -> f64 {
    let load = if sponsorship {
        config.sponsorship_burnout
    } else {
        0.0
    };
    config.hours_burnout_rate * f64::from(hours)
        + config.consistency_burnout_rate * (f64::from(agent.traits.consistency) - TRAIT_MIDPOINT)
        + config.drive_burnout_rate * f64::from(agent.traits.drive)
        - config.natural_recovery
        + load
}

fn uniform(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}
