//! Scenario definitions: named bundles of transition parameters.
//!
//! A scenario is a baseline persistence probability plus multiplier tables
//! keyed by demographic attribute values. Multipliers >1 make the matching
//! next-state more likely, <1 less likely. Absence of a key means "no
//! adjustment" for that value, never an error.
//!
//! Tables are `BTreeMap`s rather than `HashMap`s: iteration order is then
//! fixed, which keeps weight construction bit-for-bit reproducible.

use crate::categories::{AgeGroup, Disability, EmploymentState, Sex};
use crate::error::ConfigurationError;
use crate::population::Individual;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Per-state multiplier table for one attribute value.
pub type StateMultipliers = BTreeMap<EmploymentState, f64>;

/// The four attribute dimensions a scenario may adjust, in the order they
/// are applied to every individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Age,
    Disability,
    Sex,
    EthnicityMinor,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Age,
        Dimension::Disability,
        Dimension::Sex,
        Dimension::EthnicityMinor,
    ];
}

/// A validated, read-only scenario. Construction is the only place
/// configuration errors can surface; a constructed scenario is safe to
/// sample from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDefinition {
    name: String,
    stay_prob: f64,
    age: BTreeMap<AgeGroup, StateMultipliers>,
    disability: BTreeMap<Disability, StateMultipliers>,
    sex: BTreeMap<Sex, StateMultipliers>,
    ethnicity_minor: StateMultipliers,
}

impl ScenarioDefinition {
    pub fn new(
        name: impl Into<String>,
        stay_prob: f64,
        age: BTreeMap<AgeGroup, StateMultipliers>,
        disability: BTreeMap<Disability, StateMultipliers>,
        sex: BTreeMap<Sex, StateMultipliers>,
        ethnicity_minor: StateMultipliers,
    ) -> Result<ScenarioDefinition, ConfigurationError> {
        let name = name.into();
        if !(stay_prob > 0.0 && stay_prob <= 1.0) {
            return Err(ConfigurationError::StayProbOutOfRange {
                scenario: name,
                value: stay_prob,
            });
        }
        for (group, table) in &age {
            validate_table(&name, "age", &group.to_string(), table)?;
        }
        for (status, table) in &disability {
            validate_table(&name, "disability", &status.to_string(), table)?;
        }
        for (sex_value, table) in &sex {
            validate_table(&name, "sex", &sex_value.to_string(), table)?;
        }
        validate_table(&name, "ethnicity_minor", "minority", &ethnicity_minor)?;
        Ok(ScenarioDefinition {
            name,
            stay_prob,
            age,
            disability,
            sex,
            ethnicity_minor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Baseline probability of remaining in the current state.
    pub fn stay_prob(&self) -> f64 {
        self.stay_prob
    }

    /// Multiplier table applying to `individual` along `dimension`, or
    /// `None` when the scenario defines no adjustment for that value.
    pub fn multipliers_for(
        &self,
        dimension: Dimension,
        individual: &Individual,
    ) -> Option<&StateMultipliers> {
        let table = match dimension {
            Dimension::Age => self.age.get(&individual.age_group),
            Dimension::Disability => self.disability.get(&individual.disability),
            Dimension::Sex => self.sex.get(&individual.sex),
            Dimension::EthnicityMinor => {
                individual.ethnicity.is_minority().then_some(&self.ethnicity_minor)
            }
        };
        table.filter(|t| !t.is_empty())
    }

    /// The default policy levers: stronger persistence with demographic
    /// skews observed in the survey.
    pub fn baseline() -> ScenarioDefinition {
        ScenarioDefinition::new(
            "Baseline",
            0.70,
            BTreeMap::from([
                (
                    AgeGroup::YoungAdults,
                    BTreeMap::from([
                        (EmploymentState::Student, 1.30),
                        (EmploymentState::PartTime, 1.15),
                        (EmploymentState::Retired, 0.60),
                        (EmploymentState::HousePerson, 0.85),
                    ]),
                ),
                (
                    AgeGroup::Adults,
                    BTreeMap::from([
                        (EmploymentState::FullTime, 1.20),
                        (EmploymentState::Unemployed, 0.90),
                    ]),
                ),
                (
                    AgeGroup::OlderAdults,
                    BTreeMap::from([
                        (EmploymentState::Retired, 1.60),
                        (EmploymentState::FullTime, 0.60),
                        (EmploymentState::PartTime, 0.80),
                    ]),
                ),
            ]),
            BTreeMap::from([(
                Disability::Yes,
                BTreeMap::from([
                    (EmploymentState::LongtermIllness, 1.30),
                    (EmploymentState::FullTime, 0.85),
                ]),
            )]),
            BTreeMap::from([
                (
                    Sex::Female,
                    BTreeMap::from([
                        (EmploymentState::PartTime, 1.15),
                        (EmploymentState::HousePerson, 1.15),
                    ]),
                ),
                (Sex::Male, BTreeMap::from([(EmploymentState::FullTime, 1.05)])),
            ]),
            BTreeMap::from([
                (EmploymentState::FullTime, 0.95),
                (EmploymentState::PartTime, 1.05),
                (EmploymentState::Unemployed, 1.05),
            ]),
        )
        .expect("baseline scenario parameters are valid")
    }

    /// Inclusive activation: better outcomes for disabled and minority
    /// individuals, slightly weaker inertia.
    pub fn inclusive_policy() -> ScenarioDefinition {
        ScenarioDefinition::new(
            "Inclusive Policy",
            0.65,
            BTreeMap::from([
                (
                    AgeGroup::YoungAdults,
                    BTreeMap::from([
                        (EmploymentState::Student, 1.10),
                        (EmploymentState::PartTime, 1.10),
                    ]),
                ),
                (
                    AgeGroup::Adults,
                    BTreeMap::from([
                        (EmploymentState::FullTime, 1.15),
                        (EmploymentState::Unemployed, 0.85),
                    ]),
                ),
            ]),
            BTreeMap::from([(
                Disability::Yes,
                BTreeMap::from([
                    (EmploymentState::FullTime, 1.15),
                    (EmploymentState::PartTime, 1.10),
                    (EmploymentState::LongtermIllness, 0.85),
                ]),
            )]),
            BTreeMap::from([
                (Sex::Female, BTreeMap::from([(EmploymentState::PartTime, 1.05)])),
                (Sex::Male, BTreeMap::from([(EmploymentState::FullTime, 1.05)])),
            ]),
            BTreeMap::from([
                (EmploymentState::FullTime, 1.05),
                (EmploymentState::Unemployed, 0.95),
            ]),
        )
        .expect("inclusive policy scenario parameters are valid")
    }

    /// Youth employment focus: young adults pushed towards work and away
    /// from unemployment; no other levers.
    pub fn youth_pathways() -> ScenarioDefinition {
        ScenarioDefinition::new(
            "Youth Pathways",
            0.68,
            BTreeMap::from([(
                AgeGroup::YoungAdults,
                BTreeMap::from([
                    (EmploymentState::FullTime, 1.20),
                    (EmploymentState::PartTime, 1.15),
                    (EmploymentState::Unemployed, 0.85),
                    (EmploymentState::Student, 0.90),
                ]),
            )]),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
        )
        .expect("youth pathways scenario parameters are valid")
    }

    /// All hand-specified scenarios, in presentation order.
    pub fn built_in() -> Vec<ScenarioDefinition> {
        vec![
            ScenarioDefinition::baseline(),
            ScenarioDefinition::inclusive_policy(),
            ScenarioDefinition::youth_pathways(),
        ]
    }
}

fn validate_table(
    scenario: &str,
    dimension: &'static str,
    value: &str,
    table: &StateMultipliers,
) -> Result<(), ConfigurationError> {
    for (&state, &multiplier) in table {
        if !(multiplier > 0.0 && multiplier.is_finite()) {
            return Err(ConfigurationError::InvalidMultiplier {
                scenario: scenario.to_string(),
                dimension,
                value: value.to_string(),
                state,
                multiplier,
            });
        }
    }
    Ok(())
}

/// Raw scenario shape as it appears in experiment TOML files. Absent tables
/// default to empty; validation happens on conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioSpec {
    pub stay_prob: f64,
    #[serde(default)]
    pub age: BTreeMap<AgeGroup, StateMultipliers>,
    #[serde(default)]
    pub disability: BTreeMap<Disability, StateMultipliers>,
    #[serde(default)]
    pub sex: BTreeMap<Sex, StateMultipliers>,
    #[serde(default)]
    pub ethnicity_minor: StateMultipliers,
}

impl ScenarioSpec {
    pub fn into_scenario(
        self,
        name: impl Into<String>,
    ) -> Result<ScenarioDefinition, ConfigurationError> {
        ScenarioDefinition::new(
            name,
            self.stay_prob,
            self.age,
            self.disability,
            self.sex,
            self.ethnicity_minor,
        )
    }
}
