//! Earned qualitative tags.
//!
//! Tags come in opposing pairs (see [`Tag::opposite`]); granting one side
//! always removes the other, so an agent never holds both. Rising and
//! Fading describe the current run of form and lapse with it. The other
//! tags stay until their opposite is earned.

use std::collections::BTreeSet;

use clout_types::{Agent, Tag};

use crate::config::GrowthConfig;

/// Consistency at or above which a steady agent becomes Reliable.
const RELIABLE_CONSISTENCY: u8 = 8;

/// Risk at or above which a volatile agent becomes Erratic.
const ERRATIC_RISK: u8 = 8;

/// Ticks of career before Reliable can be earned.
const RELIABLE_MIN_CAREER: u32 = 26;

/// Grant a tag, dropping its opposite. Returns `true` if the tag is new.
pub fn grant_tag(tags: &mut BTreeSet<Tag>, tag: Tag) -> bool {
    if let Some(opposite) = tag.opposite() {
        tags.remove(&opposite);
    }
    tags.insert(tag)
}

/// Re-evaluate the tags an agent earns from its latest week.
///
/// Returns the tags newly granted this call.
pub fn evaluate(agent: &mut Agent, config: &GrowthConfig) -> Vec<Tag> {
    let mut earned = Vec::new();

    if agent.last_growth_rate < config.rising_growth_rate {
        agent.tags.remove(&Tag::Rising);
    }
    if agent.decline_streak < config.fading_decline_streak {
        agent.tags.remove(&Tag::Fading);
    }

    if agent.last_growth_rate >= config.rising_growth_rate {
        earned.push(Tag::Rising);
    } else if agent.decline_streak >= config.fading_decline_streak {
        earned.push(Tag::Fading);
    }

    if agent.traits.consistency >= RELIABLE_CONSISTENCY
        && agent.decline_streak == 0
        && agent.career_ticks >= RELIABLE_MIN_CAREER
    {
        earned.push(Tag::Reliable);
    } else if agent.traits.risk >= ERRATIC_RISK
        && agent.last_growth_rate.abs() >= config.rising_growth_rate
    {
        earned.push(Tag::Erratic);
    }

    if agent.tenure_years() >= config.veteran_years {
        earned.push(Tag::Veteran);
    }

    earned.retain(|tag| grant_tag(&mut agent.tags, *tag));
    earned
}

/// Growth-rate bonus contributed by an agent's tags.
pub fn growth_bonus(tags: &BTreeSet<Tag>) -> f64 {
    tags.iter()
        .map(|tag| match tag {
            Tag::Rising => 0.002,
            Tag::FanFavorite => 0.001,
            Tag::Fading => -0.002,
            Tag::Controversial => -0.001,
            Tag::Reliable | Tag::Erratic | Tag::Veteran | Tag::Comeback => 0.0,
        })
        .sum()
}
