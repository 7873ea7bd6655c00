//! Canonical category registry for the survey population.
//!
//! The enums here are the closed sets every cleaned record draws its values
//! from. `EmploymentState::ALL` is ordered; that order fixes transition-matrix
//! row/column order everywhere downstream, so it must not be rearranged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of canonical employment states (K in the transition model).
pub const NUM_STATES: usize = 8;

/// Canonical employment states, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmploymentState {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Unemployed,
    Student,
    #[serde(rename = "House person")]
    HousePerson,
    #[serde(rename = "Longterm illness")]
    LongtermIllness,
    Retired,
    #[serde(rename = "others")]
    Others,
}

impl EmploymentState {
    /// All states in canonical order.
    pub const ALL: [EmploymentState; NUM_STATES] = [
        EmploymentState::FullTime,
        EmploymentState::PartTime,
        EmploymentState::Unemployed,
        EmploymentState::Student,
        EmploymentState::HousePerson,
        EmploymentState::LongtermIllness,
        EmploymentState::Retired,
        EmploymentState::Others,
    ];

    /// Position in `ALL`; used to index weight vectors and matrices.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical survey label.
    pub fn label(self) -> &'static str {
        match self {
            EmploymentState::FullTime => "Full-time",
            EmploymentState::PartTime => "Part-time",
            EmploymentState::Unemployed => "Unemployed",
            EmploymentState::Student => "Student",
            EmploymentState::HousePerson => "House person",
            EmploymentState::LongtermIllness => "Longterm illness",
            EmploymentState::Retired => "Retired",
            EmploymentState::Others => "others",
        }
    }

    /// Look up a canonical label. Returns `None` for anything outside the
    /// registry; callers decide whether that is a coercion or an error.
    pub fn from_label(label: &str) -> Option<EmploymentState> {
        EmploymentState::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Active/Inactive/Others banding used by the summary layer.
    pub fn activity(self) -> Activity {
        match self {
            EmploymentState::FullTime | EmploymentState::PartTime => Activity::Active,
            EmploymentState::Unemployed
            | EmploymentState::Student
            | EmploymentState::HousePerson
            | EmploymentState::LongtermIllness => Activity::Inactive,
            EmploymentState::Retired | EmploymentState::Others => Activity::Others,
        }
    }
}

impl fmt::Display for EmploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse employment activity banding (Full/Part-time count as Active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Activity {
    Active,
    Inactive,
    Others,
}

/// Age bands the raw survey ages collapse into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Children and adolescents (0–18)")]
    ChildrenAndAdolescents,
    #[serde(rename = "Young adults (18–25)")]
    YoungAdults,
    #[serde(rename = "Adults (26–64)")]
    Adults,
    #[serde(rename = "Older adults (65+)")]
    OlderAdults,
    Unknown,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::ChildrenAndAdolescents,
        AgeGroup::YoungAdults,
        AgeGroup::Adults,
        AgeGroup::OlderAdults,
        AgeGroup::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::ChildrenAndAdolescents => "Children and adolescents (0–18)",
            AgeGroup::YoungAdults => "Young adults (18–25)",
            AgeGroup::Adults => "Adults (26–64)",
            AgeGroup::OlderAdults => "Older adults (65+)",
            AgeGroup::Unknown => "Unknown",
        }
    }

    /// Band a raw survey age. Missing or non-finite ages are `Unknown`.
    pub fn from_age(age: Option<f64>) -> AgeGroup {
        let a = match age {
            Some(a) if a.is_finite() => a as i64,
            _ => return AgeGroup::Unknown,
        };
        if a <= 18 {
            AgeGroup::ChildrenAndAdolescents
        } else if a <= 25 {
            AgeGroup::YoungAdults
        } else if a <= 64 {
            AgeGroup::Adults
        } else {
            AgeGroup::OlderAdults
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Disability status, collapsed from the survey's finer categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Disability {
    Yes,
    No,
    Unknown,
}

impl Disability {
    pub const ALL: [Disability; 3] = [Disability::Yes, Disability::No, Disability::Unknown];

    pub fn label(self) -> &'static str {
        match self {
            Disability::Yes => "Yes",
            Disability::No => "No",
            Disability::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Disability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sex categories after harmonization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[serde(rename = "LGBTQ")]
    Lgbtq,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 4] = [Sex::Male, Sex::Female, Sex::Lgbtq, Sex::Other];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Lgbtq => "LGBTQ",
            Sex::Other => "Other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ethnicity categories after harmonization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ethnicity {
    White,
    Black,
    Asian,
    Mixed,
    Other,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 5] = [
        Ethnicity::White,
        Ethnicity::Black,
        Ethnicity::Asian,
        Ethnicity::Mixed,
        Ethnicity::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Ethnicity::White => "White",
            Ethnicity::Black => "Black",
            Ethnicity::Asian => "Asian",
            Ethnicity::Mixed => "Mixed",
            Ethnicity::Other => "Other",
        }
    }

    /// The ethnicity-minority scenario dimension applies to every
    /// non-majority (non-White) category.
    pub fn is_minority(self) -> bool {
        !matches!(self, Ethnicity::White)
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
