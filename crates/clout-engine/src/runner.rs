//! Bounded simulation loop.
//!
//! [`run_simulation`] drives [`Simulation::advance_tick`] until the tick
//! limit is reached or the active population dies out, handing every
//! completed tick to a [`TickCallback`].

use std::collections::BTreeMap;

use tracing::{info, warn};

use clout_core::{Simulation, TickResult};

use crate::error::EngineError;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured number of ticks ran.
    MaxTicksReached,
    /// No active agents remain.
    Extinction,
}

/// Result of a bounded run.
#[derive(Debug)]
pub struct RunResult {
    /// Why the run ended.
    pub end_reason: EndReason,
    /// The last tick result, if any tick completed.
    pub final_result: Option<TickResult>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Called after each tick completes.
pub trait TickCallback {
    /// Receives the finished tick and the façade it ran on.
    fn on_tick(&mut self, result: &TickResult, sim: &Simulation);
}

/// Logs a one-line summary of every tick.
pub struct LogCallback;

impl TickCallback for LogCallback {
    fn on_tick(&mut self, result: &TickResult, sim: &Simulation) {
        let population = &result.snapshot.population;
        let leader = result.snapshot.top_agents.first().map(|r| r.name.as_str());
        info!(
            tick = result.tick,
            date = %result.date,
            active = population.active,
            signed = population.signed,
            retired = population.retired,
            debuts = result.debuts.len(),
            retirements = result.retirements.len(),
            comebacks = result.comebacks.len(),
            signings = result.signings.len(),
            releases = result.releases.len(),
            trends = sim.active_trends().len(),
            leader,
            "Week summary"
        );
        if result.repairs > 0 {
            warn!(tick = result.tick, repairs = result.repairs, "World repaired after tick");
        }
    }
}

/// Run up to `max_ticks` weeks with every agent on its default schedule.
pub fn run_simulation(
    sim: &mut Simulation,
    max_ticks: u64,
    callback: &mut dyn TickCallback,
) -> Result<RunResult, EngineError> {
    let schedules = BTreeMap::new();
    let mut final_result: Option<TickResult> = None;
    let mut total_ticks: u64 = 0;

    info!(max_ticks, start_tick = sim.state().tick(), "Simulation starting");

    while total_ticks < max_ticks {
        let result = sim.advance_tick(&schedules)?;
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&result, sim);

        if result.snapshot.population.active == 0 {
            info!(tick = result.tick, "No active agents remain");
            return Ok(RunResult {
                end_reason: EndReason::Extinction,
                final_result: Some(result),
                total_ticks,
            });
        }
        final_result = Some(result);
    }

    Ok(RunResult {
        end_reason: EndReason::MaxTicksReached,
        final_result,
        total_ticks,
    })
}

/// Log the end of a run and the final standings.
pub fn log_simulation_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_result.as_ref().map(|r| r.tick),
        "Simulation ended"
    );

    let Some(last) = &result.final_result else {
        warn!("Simulation ended with no ticks executed");
        return;
    };
    for agency in &last.snapshot.agencies {
        info!(
            rank = agency.rank,
            agency = %agency.name,
            score = agency.score,
            roster = agency.roster_size,
            followers = agency.total_followers,
            "Final agency standing"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clout_core::SimulationConfig;

    use super::*;

    struct Counter(Vec<u64>);

    impl TickCallback for Counter {
        fn on_tick(&mut self, result: &TickResult, _sim: &Simulation) {
            self.0.push(result.tick);
        }
    }

    fn sim() -> Simulation {
        let mut config = SimulationConfig::default();
        config.world.initial_agents = 40;
        Simulation::from_config(config).unwrap()
    }

    #[test]
    fn runs_exactly_max_ticks() {
        let mut sim = sim();
        let mut counter = Counter(Vec::new());
        let result = run_simulation(&mut sim, 4, &mut counter).unwrap();
        assert_eq!(result.end_reason, EndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 4);
        assert_eq!(counter.0, vec![1, 2, 3, 4]);
        assert_eq!(result.final_result.unwrap().tick, 4);
        assert_eq!(sim.state().tick(), 4);
    }

    #[test]
    fn zero_ticks_leaves_world_untouched() {
        let mut sim = sim();
        let before = sim.state().clone();
        let result = run_simulation(&mut sim, 0, &mut LogCallback).unwrap();
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_result.is_none());
        assert_eq!(sim.state(), &before);
        log_simulation_end(&result);
    }

    #[test]
    fn empty_world_ends_in_extinction() {
        let mut config = SimulationConfig::default();
        config.world.initial_agents = 0;
        config.lifecycle.debut_min = 0;
        config.lifecycle.debut_max = 0;
        config.lifecycle.debut_per_positive_trend = 0;
        config.lifecycle.debut_cap = 0;
        let mut sim = Simulation::from_config(config).unwrap();
        let result = run_simulation(&mut sim, 10, &mut LogCallback).unwrap();
        assert_eq!(result.end_reason, EndReason::Extinction);
        assert_eq!(result.total_ticks, 1);
    }
}
