//! Retirement conditions and consequences.
//!
//! Each active agent is checked once per tick against an ordered list of
//! conditions. Every condition that applies makes its own independent
//! roll; the first roll that succeeds retires the agent with that reason.
//! Probabilities are never summed across conditions.
//!
//! Detaching the agent from its employer's roster and moving it into the
//! retired set is the world store's job; [`retire`] only updates the agent
//! record and reports the former employer.

use rand::Rng;

use clout_types::{Agent, AgencyId, RetirementReason, TICKS_PER_YEAR};

use crate::config::LifecycleConfig;
use crate::numeric::chance;

/// Piecewise age multiplier applied to the age-amplified checks.
pub const fn age_factor(age: u32) -> f64 {
    match age {
        0..25 => 0.5,
        25..35 => 1.0,
        35..45 => 1.5,
        _ => 2.5,
    }
}

/// Roll the ordered retirement checks for one agent.
///
/// Returns the reason for the first check that fires, or `None`.
pub fn check_retirement(
    agent: &Agent,
    config: &LifecycleConfig,
    rng: &mut impl Rng,
) -> Option<RetirementReason> {
    let age_mult = age_factor(agent.age);

    if agent.burnout_streak >= config.burnout_streak_ticks
        && chance(rng, config.burnout_probability * age_mult)
    {
        return Some(RetirementReason::Burnout);
    }

    if agent.followers < config.irrelevance_followers
        && agent.decline_streak >= config.irrelevance_decline_ticks
        && chance(rng, config.irrelevance_probability)
    {
        return Some(RetirementReason::Irrelevance);
    }

    if agent.career_ticks >= config.decline_career_ticks
        && agent.decline_streak >= config.decline_streak_ticks
        && chance(rng, config.decline_probability * age_mult)
    {
        return Some(RetirementReason::CareerDecline);
    }

    if agent.followers >= config.graceful_followers
        && agent.career_ticks >= config.graceful_career_ticks
        && chance(rng, config.graceful_probability * age_mult)
    {
        return Some(RetirementReason::GracefulExit);
    }

    if agent.age >= config.age_threshold {
        let years_over = agent.age.saturating_sub(config.age_threshold.saturating_sub(1));
        if chance(rng, config.age_probability_per_year * f64::from(years_over)) {
            return Some(RetirementReason::Age);
        }
    }

    let career_years = f64::from(agent.career_ticks / TICKS_PER_YEAR);
    let baseline = (config.baseline_probability
        + config.baseline_per_career_year * career_years * age_mult)
        .min(config.baseline_cap);
    if chance(rng, baseline) {
        return Some(RetirementReason::Random);
    }

    None
}

/// Mark an agent retired at `tick`. Returns the employer it left, if any.
pub fn retire(agent: &mut Agent, reason: RetirementReason, tick: u64) -> Option<AgencyId> {
    agent.retired_at_tick = Some(tick);
    agent.retirement_reason = Some(reason);
    agent.contract = None;
    agent.employer.take()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::testing::sample_agent;

    // Probabilities above 1 stay certain after the age factor is applied.
    fn certain() -> LifecycleConfig {
        LifecycleConfig {
            burnout_probability: 2.0,
            irrelevance_probability: 2.0,
            decline_probability: 2.0,
            graceful_probability: 2.0,
            ..LifecycleConfig::default()
        }
    }

    fn never() -> LifecycleConfig {
        LifecycleConfig {
            burnout_probability: 0.0,
            irrelevance_probability: 0.0,
            decline_probability: 0.0,
            graceful_probability: 0.0,
            age_probability_per_year: 0.0,
            baseline_probability: 0.0,
            baseline_per_career_year: 0.0,
            ..LifecycleConfig::default()
        }
    }

    #[test]
    fn age_factor_bands() {
        assert!((age_factor(18) - 0.5).abs() < f64::EPSILON);
        assert!((age_factor(25) - 1.0).abs() < f64::EPSILON);
        assert!((age_factor(44) - 1.5).abs() < f64::EPSILON);
        assert!((age_factor(60) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn sustained_burnout_retires_first() {
        let mut agent = sample_agent();
        agent.burnout_streak = 8;
        agent.followers = 500;
        agent.decline_streak = 20;
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            check_retirement(&agent, &certain(), &mut rng),
            Some(RetirementReason::Burnout)
        );
    }

    #[test]
    fn irrelevance_requires_decline() {
        let mut agent = sample_agent();
        agent.followers = 500;
        agent.decline_streak = 11;
        let mut rng = StdRng::seed_from_u64(1);
        let config = LifecycleConfig {
            baseline_probability: 0.0,
            baseline_per_career_year: 0.0,
            ..certain()
        };
        assert_eq!(check_retirement(&agent, &config, &mut rng), None);

        agent.decline_streak = 12;
        assert_eq!(
            check_retirement(&agent, &config, &mut rng),
            Some(RetirementReason::Irrelevance)
        );
    }

    #[test]
    fn graceful_exit_for_long_famous_careers() {
        let mut agent = sample_agent();
        agent.followers = 6_000_000;
        agent.career_ticks = 600;
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            check_retirement(&agent, &certain(), &mut rng),
            Some(RetirementReason::GracefulExit)
        );
    }

    #[test]
    fn nothing_fires_with_zero_probabilities() {
        let mut agent = sample_agent();
        agent.burnout_streak = 50;
        agent.age = 70;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(check_retirement(&agent, &never(), &mut rng), None);
        }
    }

    #[test]
    fn retire_clears_employment() {
        let mut agent = sample_agent();
        let mut rng = StdRng::seed_from_u64(2);
        let agency = AgencyId::generate(&mut rng);
        agent.employer = Some(agency);
        let former = retire(&mut agent, RetirementReason::Age, 40);
        assert_eq!(former, Some(agency));
        assert!(agent.employer.is_none());
        assert!(agent.contract.is_none());
        assert_eq!(agent.retired_at_tick, Some(40));
        assert!(!agent.is_active());
    }
}
