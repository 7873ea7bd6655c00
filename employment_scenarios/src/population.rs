//! Survey ingestion: raw rows, category re-mapping and the cleaned
//! population table the simulation runs over.
//!
//! The re-mapping tables mirror the survey's harmonization rules. One
//! asymmetry is deliberate: an unrecognized raw employment label is coerced
//! to `others` rather than rejected, so the engine never observes a state
//! outside the registry. Every other demographic field must map cleanly or
//! the row is rejected with a [`DataValidationError`].

use crate::categories::{AgeGroup, Disability, EmploymentState, Ethnicity, Sex};
use crate::error::{DataValidationError, PopulationLoadError};
use serde::Deserialize;
use std::path::Path;

/// One surveyed person. Demographics are fixed for the whole run; only
/// `employment_state` changes as the rollout advances periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub id: usize,
    pub age_group: AgeGroup,
    pub disability: Disability,
    pub sex: Sex,
    pub ethnicity: Ethnicity,
    pub employment_state: EmploymentState,
}

/// A raw survey row, column names as they appear in the source extract.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "DEMO_ETHNC")]
    pub ethnicity: String,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "DEMO_EMPLS")]
    pub employment: String,
    #[serde(rename = "DEMO_SEX")]
    pub sex: String,
    #[serde(rename = "DEMO_DISA")]
    pub disability: Option<String>,
}

fn map_ethnicity(row: usize, raw: &str) -> Result<Ethnicity, DataValidationError> {
    match raw {
        "White" => Ok(Ethnicity::White),
        "Black" => Ok(Ethnicity::Black),
        "Asian" => Ok(Ethnicity::Asian),
        "Mixed" => Ok(Ethnicity::Mixed),
        "Other" | "Prefer not to say" => Ok(Ethnicity::Other),
        _ => Err(DataValidationError {
            row,
            field: "DEMO_ETHNC",
            value: raw.to_string(),
        }),
    }
}

fn map_employment(raw: &str) -> EmploymentState {
    match raw {
        "Full-time" => EmploymentState::FullTime,
        "Part-time" => EmploymentState::PartTime,
        "Unemployed" => EmploymentState::Unemployed,
        "Student" => EmploymentState::Student,
        "Retired" => EmploymentState::Retired,
        "Housewife/husband/person" => EmploymentState::HousePerson,
        "Unable to work due to long term illness" => EmploymentState::LongtermIllness,
        // "Prefer not to say", "Other" and anything unmapped all land here.
        _ => EmploymentState::Others,
    }
}

fn map_sex(row: usize, raw: &str) -> Result<Sex, DataValidationError> {
    match raw {
        "Male" => Ok(Sex::Male),
        "Female" => Ok(Sex::Female),
        "Non-binary / third gender" => Ok(Sex::Lgbtq),
        "Prefer not to say" => Ok(Sex::Other),
        _ => Err(DataValidationError {
            row,
            field: "DEMO_SEX",
            value: raw.to_string(),
        }),
    }
}

fn map_disability(row: usize, raw: Option<&str>) -> Result<Disability, DataValidationError> {
    match raw {
        Some("Yes, limited a little") | Some("Yes, limited a lot") => Ok(Disability::Yes),
        Some("No") => Ok(Disability::No),
        Some("Prefer not to say") | Some("Don't know") | Some("") | None => Ok(Disability::Unknown),
        Some(other) => Err(DataValidationError {
            row,
            field: "DEMO_DISA",
            value: other.to_string(),
        }),
    }
}

/// Clean one raw row into a canonical [`Individual`]. `row` is the
/// zero-based position in the source table and becomes the individual id.
pub fn clean_record(row: usize, raw: &RawRecord) -> Result<Individual, DataValidationError> {
    Ok(Individual {
        id: row,
        age_group: AgeGroup::from_age(raw.age),
        disability: map_disability(row, raw.disability.as_deref())?,
        sex: map_sex(row, &raw.sex)?,
        ethnicity: map_ethnicity(row, &raw.ethnicity)?,
        employment_state: map_employment(&raw.employment),
    })
}

/// Read and clean a population CSV. Fails on the first malformed or
/// out-of-category row, before any simulation can start.
pub fn load_population<P: AsRef<Path>>(path: P) -> Result<Vec<Individual>, PopulationLoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut population = Vec::new();
    for (row, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result?;
        population.push(clean_record(row, &raw)?);
    }
    Ok(population)
}
