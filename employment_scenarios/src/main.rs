//! Employment scenario microsimulation - demo run.
//!
//! Runs the three built-in policy scenarios over a population for one
//! period and prints the before/after analysis per scenario. Pass a
//! population CSV path to use survey data; without arguments a synthetic
//! population is generated from the seed.

use employment_scenarios::analysis::{
    active_share_by_disability, CompositionShares, ScenarioSummary, TransitionMatrix,
};
use employment_scenarios::output::{self, RunMetadata};
use employment_scenarios::{
    batch, population, AgeGroup, Disability, EmploymentState, Ethnicity, Individual,
    ScenarioDefinition, Sex,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::env;

fn main() {
    println!("=== Employment Scenario Microsimulation ===\n");

    let seed = 42;
    let periods = 1;

    let population = match env::args().nth(1) {
        Some(path) => {
            println!("Loading population from {}", path);
            match population::load_population(&path) {
                Ok(pop) => pop,
                Err(e) => {
                    eprintln!("Error loading population: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("No population file given; generating a synthetic population");
            synthetic_population(1000, seed)
        }
    };
    println!("Population: {} individuals", population.len());

    let scenarios = ScenarioDefinition::built_in();
    println!(
        "Scenarios: {}",
        scenarios
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Periods: {}, seed: {}\n", periods, seed);

    let panels = match batch::run_all(&population, &scenarios, periods, seed) {
        Ok(panels) => panels,
        Err(e) => {
            eprintln!("Batch error: {}", e);
            std::process::exit(1);
        }
    };

    let mut summaries = Vec::new();
    for scenario in &scenarios {
        let panel = &panels[scenario.name()];
        println!("--- {} ---\n", scenario.name());

        println!("Transition matrix (current → next):");
        println!("{}", TransitionMatrix::from_panel(panel));

        let shares = CompositionShares::from_panel(panel);
        println!("Composition (share of population):");
        println!("{:18} {:>8} {:>8}", "", "before", "after");
        for state in EmploymentState::ALL {
            println!(
                "{:18.18} {:>8.3} {:>8.3}",
                state.label(),
                shares.before[state.index()],
                shares.after[state.index()]
            );
        }
        println!();

        println!("Active share by disability (after):");
        for (group, share) in active_share_by_disability(panel) {
            println!("  {:8} {:.3}", group.label(), share);
        }
        println!();

        summaries.push(ScenarioSummary::from_panel(panel));
    }

    println!("Cross-scenario active share summary:");
    for summary in &summaries {
        println!(
            "  {:20} overall={:.3}",
            summary.scenario, summary.active_share_overall
        );
    }

    let metadata = RunMetadata::new(
        seed,
        periods,
        population.len(),
        scenarios.iter().map(|s| s.name().to_string()).collect(),
    );
    match output::write_all(&panels, &metadata, "results") {
        Ok(()) => println!("\nResults written to results/"),
        Err(e) => eprintln!("\nError writing results: {}", e),
    }
}

/// Seeded synthetic population with a rough skew towards the common survey
/// categories, for demo runs without data.
fn synthetic_population(size: usize, seed: u64) -> Vec<Individual> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|id| {
            let age = rng.gen_range(16.0..90.0);
            let ethnicity = if rng.gen_bool(0.8) {
                Ethnicity::White
            } else {
                *[Ethnicity::Black, Ethnicity::Asian, Ethnicity::Mixed, Ethnicity::Other]
                    .choose(&mut rng)
                    .unwrap()
            };
            let disability = if rng.gen_bool(0.2) {
                Disability::Yes
            } else if rng.gen_bool(0.1) {
                Disability::Unknown
            } else {
                Disability::No
            };
            Individual {
                id,
                age_group: AgeGroup::from_age(Some(age)),
                disability,
                sex: *Sex::ALL.choose(&mut rng).unwrap(),
                ethnicity,
                employment_state: *EmploymentState::ALL.choose(&mut rng).unwrap(),
            }
        })
        .collect()
}
