//! Batch orchestration: one rollout per scenario over the same snapshot.
//!
//! Every scenario starts from the original population and the same seed, so
//! differences between panels come from scenario parameters alone. Runs are
//! independent (own population copy, own rng), which makes the rayon fan-out
//! across scenarios safe.

use crate::error::DuplicateScenarioError;
use crate::population::Individual;
use crate::runner::{self, Panel};
use crate::scenario::ScenarioDefinition;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// Run every scenario over `population`, keyed by scenario name.
///
/// Fails before any sampling if two scenarios share a name.
pub fn run_all(
    population: &[Individual],
    scenarios: &[ScenarioDefinition],
    periods: usize,
    seed: u64,
) -> Result<BTreeMap<String, Panel>, DuplicateScenarioError> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.name()) {
            return Err(DuplicateScenarioError {
                name: scenario.name().to_string(),
            });
        }
    }

    Ok(scenarios
        .par_iter()
        .map(|scenario| {
            let panel = runner::run(population, scenario, periods, seed);
            (scenario.name().to_string(), panel)
        })
        .collect())
}
