//! Patient demographics consumed by reference-range selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient sex as recorded at registration.
///
/// Reference tables only distinguish male and female ranges; a patient
/// record with no recorded sex keeps the unconditioned defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    /// Parse a sex string. Handles single-letter codes and full words
    /// as they appear in registration forms (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "M" | "MALE" => Ok(Sex::Male),
            "F" | "FEMALE" => Ok(Sex::Female),
            _ => Err(format!("Unknown sex: {s}")),
        }
    }
}

/// The demographic slice of a patient record that range selection reads.
///
/// Everything else about the patient (name, contact, referrer) lives in the
/// registration store and never reaches the evaluator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    /// Registration identifier, carried into saved records.
    pub patient_id: Option<String>,
    pub sex: Option<Sex>,
    pub age_years: Option<u32>,
}

impl Patient {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            sex: None,
            age_years: None,
        }
    }

    #[must_use]
    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    #[must_use]
    pub fn with_age_years(mut self, age: u32) -> Self {
        self.age_years = Some(age);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_from_str() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" MALE ".parse::<Sex>().unwrap(), Sex::Male);
        assert!("X".parse::<Sex>().is_err());
    }

    #[test]
    fn test_patient_builder() {
        let patient = Patient::new("P-0042").with_sex(Sex::Female).with_age_years(34);
        assert_eq!(patient.patient_id.as_deref(), Some("P-0042"));
        assert_eq!(patient.sex, Some(Sex::Female));
        assert_eq!(patient.age_years, Some(34));
    }
}
