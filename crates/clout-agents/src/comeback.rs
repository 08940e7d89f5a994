//! Comebacks of retired agents.

use rand::Rng;

use clout_types::{Agent, Tag};

use crate::config::LifecycleConfig;
use crate::numeric::{chance, round_to_u64, to_f64};
use crate::tags::grant_tag;

/// Whether a retired agent has been away long enough to return.
pub fn is_eligible(agent: &Agent, tick: u64, config: &LifecycleConfig) -> bool {
    agent
        .retired_at_tick
        .is_some_and(|at| tick.saturating_sub(at) >= config.comeback_min_ticks)
}

/// Roll the weekly comeback chance for an eligible agent.
pub fn roll_comeback(agent: &Agent, tick: u64, config: &LifecycleConfig, rng: &mut impl Rng) -> bool {
    is_eligible(agent, tick, config) && chance(rng, config.comeback_probability)
}

/// Bring a retired agent back as a free agent.
///
/// Followers reset to a fraction of the historical peak (never below the
/// floor), condition to zero, and every streak is cleared.
pub fn reinstate(agent: &mut Agent, config: &LifecycleConfig, follower_floor: u64) {
    let restored = (to_f64(agent.peak_followers) * config.comeback_peak_fraction).floor();
    agent.followers = round_to_u64(restored).max(follower_floor);
    agent.last_followers = agent.followers;
    agent.condition = 0;
    agent.decline_streak = 0;
    agent.burnout_streak = 0;
    agent.last_growth_rate = 0.0;
    agent.retired_at_tick = None;
    agent.retirement_reason = None;
    agent.employer = None;
    agent.contract = None;
    grant_tag(&mut agent.tags, Tag::Comeback);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use clout_types::RetirementReason;

    use super::*;
    use crate::testing::sample_agent;

    fn retired_agent(at: u64) -> Agent {
        let mut agent = sample_agent();
        agent.retired_at_tick = Some(at);
        agent.retirement_reason = Some(RetirementReason::Burnout);
        agent.peak_followers = 1_234_567;
        agent.condition = 90;
        agent.burnout_streak = 9;
        agent.decline_streak = 4;
        agent
    }

    #[test]
    fn eligibility_requires_minimum_wait() {
        let config = LifecycleConfig::default();
        let agent = retired_agent(10);
        assert!(!is_eligible(&agent, 35, &config));
        assert!(is_eligible(&agent, 36, &config));
        assert!(!is_eligible(&sample_agent(), 100, &config));
    }

    #[test]
    fn reinstate_resets_state() {
        let mut agent = retired_agent(0);
        reinstate(&mut agent, &LifecycleConfig::default(), 100);
        assert_eq!(agent.followers, 370_370);
        assert_eq!(agent.condition, 0);
        assert_eq!(agent.burnout_streak, 0);
        assert_eq!(agent.decline_streak, 0);
        assert!(agent.is_free_agent());
        assert!(agent.has_tag(Tag::Comeback));
    }

    #[test]
    fn reinstate_respects_floor() {
        let mut agent = retired_agent(0);
        agent.peak_followers = 200;
        reinstate(&mut agent, &LifecycleConfig::default(), 100);
        assert_eq!(agent.followers, 100);
    }

    #[test]
    fn certain_comeback_rolls_true() {
        let config = LifecycleConfig {
            comeback_probability: 1.0,
            ..LifecycleConfig::default()
        };
        let agent = retired_agent(0);
        let mut rng = StdRng::seed_from_u64(4);
        assert!(roll_comeback(&agent, 30, &config, &mut rng));
        assert!(!roll_comeback(&agent, 5, &config, &mut rng));
    }
}
