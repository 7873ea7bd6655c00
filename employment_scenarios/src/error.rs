//! Error types for scenario configuration, population loading and batch runs.

use crate::categories::EmploymentState;
use thiserror::Error;

/// Invalid scenario parameters, caught when the scenario is constructed.
/// Sampling never raises this; a scenario that constructs is safe to run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("scenario {scenario:?}: stay_prob {value} outside (0, 1]")]
    StayProbOutOfRange { scenario: String, value: f64 },

    #[error(
        "scenario {scenario:?}: multiplier {multiplier} for state {state} \
         ({dimension} = {value:?}) must be a positive finite number"
    )]
    InvalidMultiplier {
        scenario: String,
        dimension: &'static str,
        value: String,
        state: EmploymentState,
        multiplier: f64,
    },
}

/// A population row whose fields fall outside the canonical categories.
/// Fatal to the whole run; raised before any sampling begins.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}: unrecognized {field} value {value:?}")]
pub struct DataValidationError {
    pub row: usize,
    pub field: &'static str,
    pub value: String,
}

/// Two scenarios in one batch share a name. Fatal to the batch.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("duplicate scenario name {name:?}")]
pub struct DuplicateScenarioError {
    pub name: String,
}

/// Failure while reading a population file: either the CSV itself is
/// malformed or a row failed category validation.
#[derive(Debug, Error)]
pub enum PopulationLoadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Validation(#[from] DataValidationError),
}
