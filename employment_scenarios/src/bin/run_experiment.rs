//! Batch experiment runner.
//!
//! Executes a scenario batch described by a TOML configuration file and
//! saves panels plus the cross-scenario summary.
//!
//! Usage:
//!   cargo run --release --bin run_experiment -- experiments/baseline.toml

use employment_scenarios::analysis::ScenarioSummary;
use employment_scenarios::output::{self, RunMetadata};
use employment_scenarios::{
    batch, population, AgeGroup, Disability, EmploymentState, Ethnicity, Individual, ScenarioSpec,
    Sex,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level experiment configuration
#[derive(Debug, Clone, Deserialize)]
struct ExperimentConfig {
    experiment: ExperimentMetadata,
    population: PopulationSource,
    scenarios: BTreeMap<String, ScenarioSpec>,
}

#[derive(Debug, Clone, Deserialize)]
struct ExperimentMetadata {
    name: String,
    description: String,
    periods: usize,
    seed: u64,
}

/// Where the population comes from: a cleaned survey CSV, or a synthetic
/// population of the given size (seeded from the experiment seed).
#[derive(Debug, Clone, Deserialize)]
struct PopulationSource {
    csv: Option<PathBuf>,
    synthetic: Option<usize>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <experiment_config.toml>", args[0]);
        eprintln!("Example: {} experiments/baseline.toml", args[0]);
        std::process::exit(1);
    }

    let config_path = &args[1];
    println!("=== Employment Scenarios Experiment Runner ===\n");
    println!("Loading experiment config: {}\n", config_path);

    let config_str = fs::read_to_string(config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: ExperimentConfig = toml::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing TOML config: {}", e);
        std::process::exit(1);
    });

    println!("Experiment: {}", config.experiment.name);
    println!("Description: {}", config.experiment.description);
    println!(
        "Configuration: {} scenarios × {} periods, seed {}\n",
        config.scenarios.len(),
        config.experiment.periods,
        config.experiment.seed
    );

    // Validate every scenario before touching the population.
    let mut scenarios = Vec::with_capacity(config.scenarios.len());
    for (name, spec) in config.scenarios {
        match spec.into_scenario(&name) {
            Ok(scenario) => scenarios.push(scenario),
            Err(e) => {
                eprintln!("Invalid scenario: {}", e);
                std::process::exit(1);
            }
        }
    }

    let population = load_population(&config.population, config.experiment.seed);
    println!("Population: {} individuals\n", population.len());

    let start = Instant::now();
    let panels = batch::run_all(
        &population,
        &scenarios,
        config.experiment.periods,
        config.experiment.seed,
    )
    .unwrap_or_else(|e| {
        eprintln!("Batch error: {}", e);
        std::process::exit(1);
    });
    println!(
        "Ran {} scenario panels in {:.2}s",
        panels.len(),
        start.elapsed().as_secs_f64()
    );

    for (name, panel) in &panels {
        let summary = ScenarioSummary::from_panel(panel);
        println!(
            "  {:24} records={} active_share={:.3}",
            name,
            panel.len(),
            summary.active_share_overall
        );
    }

    let output_dir = PathBuf::from("results").join(&config.experiment.name);
    let metadata = RunMetadata::new(
        config.experiment.seed,
        config.experiment.periods,
        population.len(),
        scenarios.iter().map(|s| s.name().to_string()).collect(),
    );
    output::write_all(&panels, &metadata, &output_dir).unwrap_or_else(|e| {
        eprintln!("Error writing results: {}", e);
        std::process::exit(1);
    });

    println!("\n✓ Results saved to: {}", output_dir.display());
}

fn load_population(source: &PopulationSource, seed: u64) -> Vec<Individual> {
    match (&source.csv, source.synthetic) {
        (Some(path), _) => {
            println!("Loading population from {}", path.display());
            population::load_population(path).unwrap_or_else(|e| {
                eprintln!("Error loading population: {}", e);
                std::process::exit(1);
            })
        }
        (None, Some(size)) => {
            println!("Generating synthetic population of {}", size);
            synthetic_population(size, seed)
        }
        (None, None) => {
            eprintln!("Population source must set either csv or synthetic");
            std::process::exit(1);
        }
    }
}

fn synthetic_population(size: usize, seed: u64) -> Vec<Individual> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|id| Individual {
            id,
            age_group: AgeGroup::from_age(Some(rng.gen_range(16.0..90.0))),
            disability: if rng.gen_bool(0.2) {
                Disability::Yes
            } else {
                Disability::No
            },
            sex: *Sex::ALL.choose(&mut rng).unwrap(),
            ethnicity: *Ethnicity::ALL.choose(&mut rng).unwrap(),
            employment_state: *EmploymentState::ALL.choose(&mut rng).unwrap(),
        })
        .collect()
}
