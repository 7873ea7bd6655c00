//! Per-individual transition model.
//!
//! Weight construction starts from an inertia distribution: the current
//! state gets `stay_prob`, every other state an equal share of the
//! remainder. Each scenario dimension then scales the weights of the states
//! it names, the vector is renormalized, and one state is drawn with a
//! single uniform draw from the caller's rng.

use crate::categories::{EmploymentState, NUM_STATES};
use crate::population::Individual;
use crate::scenario::{Dimension, ScenarioDefinition};
use rand::Rng;

/// Next-state probabilities for one individual under one scenario, indexed
/// in registry order. Always sums to 1.
pub fn transition_weights(
    individual: &Individual,
    scenario: &ScenarioDefinition,
) -> [f64; NUM_STATES] {
    let stay_prob = scenario.stay_prob();
    let move_weight = (1.0 - stay_prob) / (NUM_STATES as f64 - 1.0);
    let mut weights = [move_weight; NUM_STATES];
    weights[individual.employment_state.index()] = stay_prob;

    for dimension in Dimension::ALL {
        if let Some(table) = scenario.multipliers_for(dimension, individual) {
            for (&state, &multiplier) in table {
                weights[state.index()] *= multiplier;
            }
        }
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        // Multipliers are validated positive, but extreme values can
        // underflow every weight to zero. Recover with a uniform draw.
        return [1.0 / NUM_STATES as f64; NUM_STATES];
    }
    for weight in &mut weights {
        *weight /= total;
    }
    weights
}

/// Draw the next-period state. Consumes exactly one `f64` from `rng` and
/// leaves the individual untouched; the caller decides when to commit.
pub fn next_state<R: Rng>(
    individual: &Individual,
    scenario: &ScenarioDefinition,
    rng: &mut R,
) -> EmploymentState {
    let weights = transition_weights(individual, scenario);
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw < cumulative {
            return EmploymentState::ALL[index];
        }
    }
    // Rounding can leave the cumulative sum a hair under 1.0.
    EmploymentState::ALL[NUM_STATES - 1]
}
