use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{DoseError, DoseResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    pub cases: Vec<PatientCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCase {
    pub age: u32,
    pub weight_kg: f64,
    pub drug_name: String,
    pub notes: String,
}

impl CaseFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> DoseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let case_file: CaseFile = serde_json::from_str(&content)?;
        case_file.validate()?;
        Ok(case_file)
    }

    pub fn validate(&self) -> DoseResult<()> {
        if self.cases.is_empty() {
            return Err(DoseError::Validation(
                "At least one patient case must be specified".to_string()
            ));
        }

        for case in &self.cases {
            case.validate()?;
        }

        Ok(())
    }
}

impl PatientCase {
    pub fn validate(&self) -> DoseResult<()> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(DoseError::Validation(
                "Patient weight must be positive".to_string()
            ));
        }

        if self.age > 130 {
            return Err(DoseError::Validation(
                format!("Implausible patient age: {}", self.age)
            ));
        }

        if self.drug_name.trim().is_empty() {
            return Err(DoseError::Validation(
                "Drug name must not be empty".to_string()
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_case() -> PatientCase {
        PatientCase {
            age: 7,
            weight_kg: 25.0,
            drug_name: "Amoxicillin".to_string(),
            notes: "Bacterial infection, no known allergies.".to_string(),
        }
    }

    #[test]
    fn test_valid_case_passes() {
        assert!(valid_case().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let mut case = valid_case();
        case.weight_kg = 0.0;
        assert!(case.validate().is_err());

        case.weight_kg = -4.0;
        assert!(case.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_drug_name() {
        let mut case = valid_case();
        case.drug_name = "   ".to_string();
        assert!(case.validate().is_err());
    }

    #[test]
    fn test_rejects_implausible_age() {
        let mut case = valid_case();
        case.age = 200;
        assert!(case.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_case_list() {
        let case_file = CaseFile { cases: vec![] };
        assert!(case_file.validate().is_err());
    }

    #[test]
    fn test_case_file_parses_from_json() {
        let json = r#"{
            "cases": [
                {
                    "age": 75,
                    "weight_kg": 70.0,
                    "drug_name": "Lisinopril",
                    "notes": "Hypertension and mild renal impairment."
                }
            ]
        }"#;

        let case_file: CaseFile = serde_json::from_str(json).unwrap();
        assert!(case_file.validate().is_ok());
        assert_eq!(case_file.cases.len(), 1);
        assert_eq!(case_file.cases[0].age, 75);
    }
}
