//! Batch driver for independent simulation runs
//!
//! A single run is one seeded arena over `num_days`. To average out the
//! randomness of initial allocations and visit orders, experiments repeat
//! the whole run with derived seeds (`base_seed + run_index`) and average
//! the per-day series across runs.
//!
//! Independent runs share no mutable state — each owns its population,
//! pool, and RNG — so they are the natural unit of parallel execution.
//! This driver runs them sequentially; callers wanting parallelism can
//! construct per-run configs the same way and join the `RunResult`s.

use crate::orchestrator::engine::{Arena, ArenaConfig, RunResult, SimulationError, TypeAverage};
use serde::{Deserialize, Serialize};

/// Per-day metrics averaged across all runs of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAverages {
    pub day: usize,
    pub random_baseline_satisfaction: f64,
    pub optimum_bound_satisfaction: f64,
    pub type_averages: Vec<TypeAverage>,
}

/// All runs of a batch plus the cross-run per-day averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub runs: Vec<RunResult>,
    pub day_averages: Vec<DayAverages>,
}

/// Execute `num_runs` independent runs of the same configuration
///
/// Run `i` is seeded with `config.rng_seed + i`; everything else is
/// identical. Each run rebuilds its population from scratch.
pub fn run_batch(config: &ArenaConfig, num_runs: usize) -> Result<BatchResult, SimulationError> {
    if num_runs == 0 {
        return Err(SimulationError::InvalidConfig(
            "num_runs must be > 0".to_string(),
        ));
    }

    let mut runs = Vec::with_capacity(num_runs);
    for run_index in 0..num_runs {
        let mut run_config = config.clone();
        run_config.rng_seed = config.rng_seed.wrapping_add(run_index as u64);

        let mut arena = Arena::new(run_config)?;
        runs.push(arena.run()?);
    }

    let day_averages = average_days(&runs, config.num_days);
    Ok(BatchResult { runs, day_averages })
}

/// Average each day's headline metrics across runs
///
/// All runs share the population layout, so day `d` of every run carries
/// the same agent types in the same order.
fn average_days(runs: &[RunResult], num_days: usize) -> Vec<DayAverages> {
    let run_count = runs.len() as f64;

    (0..num_days)
        .map(|day| {
            let mut baseline = 0.0;
            let mut bound = 0.0;
            let mut type_sums: Vec<TypeAverage> = runs[0].days[day]
                .end_of_day_type_averages
                .iter()
                .map(|average| TypeAverage {
                    agent_type: average.agent_type,
                    satisfaction: 0.0,
                })
                .collect();

            for run in runs {
                let day_result = &run.days[day];
                baseline += day_result.random_baseline_satisfaction;
                bound += day_result.optimum_bound_satisfaction;
                for (sum, average) in type_sums
                    .iter_mut()
                    .zip(&day_result.end_of_day_type_averages)
                {
                    sum.satisfaction += average.satisfaction;
                }
            }

            for sum in &mut type_sums {
                sum.satisfaction /= run_count;
            }
            DayAverages {
                day,
                random_baseline_satisfaction: baseline / run_count,
                optimum_bound_satisfaction: bound / run_count,
                type_averages: type_sums,
            }
        })
        .collect()
}
