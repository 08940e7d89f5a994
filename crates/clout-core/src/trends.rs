//! Trend engine: the only code that creates, ages, or removes trends.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use clout_agents::numeric::chance;
use clout_types::{Trend, TrendId};

use crate::config::{TrendConfig, TrendTemplate};

/// Trends that changed state during one advance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendUpdate {
    /// Trends that began this tick.
    pub started: Vec<Trend>,
    /// Trends that expired this tick.
    pub ended: Vec<Trend>,
}

/// Age every active trend by one tick, drop expired ones, and maybe start one.
///
/// Trends reaching zero remaining ticks are removed and reported as ended.
/// While fewer than `max_active` trends remain, a single roll of
/// `start_chance` draws one template uniformly; a template whose name is
/// already active starts nothing.
pub fn advance_trends(
    trends: &mut Vec<Trend>,
    config: &TrendConfig,
    tick: u64,
    rng: &mut impl Rng,
) -> TrendUpdate {
    let mut update = TrendUpdate::default();

    for trend in trends.iter_mut() {
        trend.remaining_ticks = trend.remaining_ticks.saturating_sub(1);
    }
    let (expired, remaining): (Vec<Trend>, Vec<Trend>) =
        trends.drain(..).partition(|t| t.remaining_ticks == 0);
    *trends = remaining;
    for trend in &expired {
        debug!(tick, trend = %trend.name, "trend ended");
    }
    update.ended = expired;

    if trends.len() < config.max_active
        && chance(rng, config.start_chance)
        && let Some(template) = config.catalog.choose(rng)
        && !trends.iter().any(|t| t.name == template.name)
    {
        let trend = instantiate(template, tick, rng);
        debug!(tick, trend = %trend.name, ticks = trend.remaining_ticks, "trend started");
        trends.push(trend.clone());
        update.started.push(trend);
    }

    update
}

fn instantiate(template: &TrendTemplate, tick: u64, rng: &mut impl Rng) -> Trend {
    Trend {
        id: TrendId::generate(rng),
        name: template.name.clone(),
        kind: template.kind,
        scope: template.scope,
        popularity_multiplier: template.popularity_multiplier,
        revenue_multiplier: template.revenue_multiplier,
        remaining_ticks: template.duration_ticks.max(1),
        started_at_tick: tick,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn always_start() -> TrendConfig {
        TrendConfig {
            start_chance: 1.0,
            ..TrendConfig::default()
        }
    }

    fn never_start() -> TrendConfig {
        TrendConfig {
            start_chance: 0.0,
            ..TrendConfig::default()
        }
    }

    #[test]
    fn cap_is_never_exceeded() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = always_start();
        let mut trends = Vec::new();
        for tick in 1..=200 {
            advance_trends(&mut trends, &config, tick, &mut rng);
            assert!(trends.len() <= config.max_active);
        }
    }

    #[test]
    fn remaining_ticks_decrease_by_one() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut trends = Vec::new();
        advance_trends(&mut trends, &always_start(), 1, &mut rng);
        let started = trends.first().cloned().unwrap();

        advance_trends(&mut trends, &never_start(), 2, &mut rng);
        if started.remaining_ticks > 1 {
            let after = trends.iter().find(|t| t.id == started.id).unwrap();
            assert_eq!(after.remaining_ticks, started.remaining_ticks - 1);
        } else {
            assert!(trends.is_empty());
        }
    }

    #[test]
    fn last_tick_trend_ends_exactly_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut trends = Vec::new();
        advance_trends(&mut trends, &always_start(), 1, &mut rng);
        let mut trend = trends.pop().unwrap();
        trend.remaining_ticks = 1;
        trends.push(trend.clone());

        let update = advance_trends(&mut trends, &never_start(), 2, &mut rng);
        assert!(trends.iter().all(|t| t.id != trend.id));
        assert_eq!(update.ended.iter().filter(|t| t.id == trend.id).count(), 1);

        let update = advance_trends(&mut trends, &never_start(), 3, &mut rng);
        assert!(update.ended.iter().all(|t| t.id != trend.id));
    }

    #[test]
    fn duplicate_template_starts_nothing() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut config = always_start();
        config.catalog.truncate(1);
        let mut trends = Vec::new();
        let first = advance_trends(&mut trends, &config, 1, &mut rng);
        assert_eq!(first.started.len(), 1);
        let second = advance_trends(&mut trends, &config, 2, &mut rng);
        assert!(second.started.is_empty());
        assert_eq!(trends.len(), 1);
    }

    #[test]
    fn empty_catalog_starts_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = TrendConfig {
            catalog: Vec::new(),
            ..always_start()
        };
        let mut trends = Vec::new();
        let update = advance_trends(&mut trends, &config, 1, &mut rng);
        assert!(update.started.is_empty());
    }
}
