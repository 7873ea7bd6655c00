//! Employment scenario microsimulation.
//!
//! Simulates how a surveyed population's employment status evolves over
//! discrete periods under alternative policy scenarios. Each individual
//! carries fixed demographics (age group, disability, sex, ethnicity) and a
//! mutable employment state; a scenario is a baseline persistence
//! probability plus multiplicative adjustments keyed by demographic values.
//!
//! Pipeline:
//! - `population`: raw survey rows → cleaned canonical individuals
//! - `scenario`: validated scenario definitions (built-in or from TOML)
//! - `engine`: per-individual weight construction and stochastic draw
//! - `runner`: multi-period rollout producing a longitudinal panel
//! - `batch`: one rollout per scenario from the same snapshot and seed
//! - `analysis` / `output`: transition matrices, composition and active
//!   share summaries, CSV/JSON persistence
//!
//! Runs are bit-for-bit reproducible for a given (population, scenario,
//! periods, seed): the rng is consumed one draw per individual per period,
//! in population order.

pub mod analysis;
pub mod batch;
pub mod categories;
pub mod engine;
pub mod error;
pub mod output;
pub mod population;
pub mod runner;
pub mod scenario;

pub use categories::{Activity, AgeGroup, Disability, EmploymentState, Ethnicity, Sex, NUM_STATES};
pub use error::{
    ConfigurationError, DataValidationError, DuplicateScenarioError, PopulationLoadError,
};
pub use population::Individual;
pub use runner::{Panel, PanelRecord};
pub use scenario::{Dimension, ScenarioDefinition, ScenarioSpec, StateMultipliers};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn adult(id: usize, state: EmploymentState) -> Individual {
        Individual {
            id,
            age_group: AgeGroup::Adults,
            disability: Disability::No,
            sex: Sex::Other,
            ethnicity: Ethnicity::White,
            employment_state: state,
        }
    }

    // Three individuals, one period, a single Student boost for young
    // adults. The two adults face the plain inertia distribution; the young
    // student's retained-Student probability is 0.91/1.21 ≈ 0.752, above
    // the 0.70 baseline the others keep.
    #[test]
    fn three_person_before_after_run() {
        let population = vec![
            adult(0, EmploymentState::FullTime),
            adult(1, EmploymentState::Unemployed),
            Individual {
                id: 2,
                age_group: AgeGroup::YoungAdults,
                disability: Disability::No,
                sex: Sex::Other,
                ethnicity: Ethnicity::White,
                employment_state: EmploymentState::Student,
            },
        ];
        let scenario = ScenarioDefinition::new(
            "Student boost",
            0.70,
            BTreeMap::from([(
                AgeGroup::YoungAdults,
                BTreeMap::from([(EmploymentState::Student, 1.30)]),
            )]),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
        )
        .unwrap();

        // The two adults get no adjustment at all: exact inertia weights.
        for individual in &population[..2] {
            let weights = engine::transition_weights(individual, &scenario);
            assert_relative_eq!(weights[individual.employment_state.index()], 0.70);
        }

        // The student's retained probability is boosted and renormalized.
        let weights = engine::transition_weights(&population[2], &scenario);
        let retained = weights[EmploymentState::Student.index()];
        assert_relative_eq!(retained, 0.91 / 1.21, epsilon = 1e-12);
        assert!(retained > 0.70);

        let panels = batch::run_all(&population, &[scenario], 1, 42).unwrap();
        let panel = &panels["Student boost"];
        assert_eq!(panel.len(), 3);
        for (record, individual) in panel.records.iter().zip(&population) {
            assert_eq!(record.individual_id, individual.id);
            assert_eq!(record.state_before, individual.employment_state);
            assert!(EmploymentState::ALL.contains(&record.state_after));
        }

        // Same tuple, byte-identical result.
        let again = batch::run_all(&population, &[ScenarioDefinition::new(
            "Student boost",
            0.70,
            BTreeMap::from([(
                AgeGroup::YoungAdults,
                BTreeMap::from([(EmploymentState::Student, 1.30)]),
            )]),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
        )
        .unwrap()], 1, 42)
        .unwrap();
        assert_eq!(again["Student boost"].records, panel.records);
    }

    #[test]
    fn end_to_end_clean_run_summarize() {
        let raw_rows = [
            ("White", Some(30.0), "Full-time", "Male", Some("No")),
            ("Asian", Some(22.0), "Student", "Female", Some("No")),
            ("Black", Some(45.0), "Unemployed", "Male", Some("Yes, limited a lot")),
            ("White", Some(70.0), "Retired", "Female", None),
            ("Mixed", None, "Other", "Prefer not to say", Some("Prefer not to say")),
        ];
        let population: Vec<Individual> = raw_rows
            .iter()
            .enumerate()
            .map(|(row, &(eth, age, empl, sex, disa))| {
                population::clean_record(
                    row,
                    &population::RawRecord {
                        ethnicity: eth.to_string(),
                        age,
                        employment: empl.to_string(),
                        sex: sex.to_string(),
                        disability: disa.map(str::to_string),
                    },
                )
                .unwrap()
            })
            .collect();

        // Unmapped raw employment was coerced before the engine ran.
        assert_eq!(population[4].employment_state, EmploymentState::Others);

        let panels =
            batch::run_all(&population, &ScenarioDefinition::built_in(), 2, 42).unwrap();
        assert_eq!(panels.len(), 3);
        for panel in panels.values() {
            assert_eq!(panel.len(), 2 * population.len());
            let summary = analysis::ScenarioSummary::from_panel(panel);
            assert!(summary.active_share_overall >= 0.0);
            assert!(summary.active_share_overall <= 1.0);
        }
    }
}
