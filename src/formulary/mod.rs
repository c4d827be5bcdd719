pub mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use log::debug;
use crate::error::{DoseError, DoseResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugRecord {
    pub drug_name: String,
    pub base_dosage_per_kg: f64,
    pub age_modifications: Vec<AgeRule>,
    pub safety_profiles: SafetyProfiles,
}

/// One entry of the ordered age-adjustment rule list. Rules are scanned in
/// listed order and the first match wins. A rule with neither bound set
/// never matches and is carried for reference only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeRule {
    pub age_group: String,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub factor: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyProfiles {
    pub renal_impairment_factor: f64,
    // Present in formulary data but not consulted by the adjustment chain.
    pub liver_impairment_factor: f64,
}

impl AgeRule {
    pub fn matches(&self, age: u32) -> bool {
        if self.min_age.is_none() && self.max_age.is_none() {
            return false;
        }

        self.min_age.map_or(true, |lo| age >= lo)
            && self.max_age.map_or(true, |hi| age <= hi)
    }
}

impl DrugRecord {
    pub fn validate(&self) -> DoseResult<()> {
        if self.drug_name.trim().is_empty() {
            return Err(DoseError::InvalidRecord(
                "Drug name must not be empty".to_string()
            ));
        }

        if self.base_dosage_per_kg <= 0.0 {
            return Err(DoseError::InvalidRecord(
                format!("Base dosage for {} must be positive", self.drug_name)
            ));
        }

        for rule in &self.age_modifications {
            if rule.factor <= 0.0 {
                return Err(DoseError::InvalidRecord(
                    format!("Age factor for {} ({}) must be positive", self.drug_name, rule.age_group)
                ));
            }

            if let (Some(lo), Some(hi)) = (rule.min_age, rule.max_age) {
                if lo > hi {
                    return Err(DoseError::InvalidRecord(
                        format!("Age bounds for {} ({}) are inverted", self.drug_name, rule.age_group)
                    ));
                }
            }
        }

        if self.safety_profiles.renal_impairment_factor <= 0.0
            || self.safety_profiles.liver_impairment_factor <= 0.0
        {
            return Err(DoseError::InvalidRecord(
                format!("Safety factors for {} must be positive", self.drug_name)
            ));
        }

        Ok(())
    }
}

/// Black-box source of drug dosage metadata. Returning `Ok(None)` means the
/// drug is unknown to the provider; callers must not compute a dosage from it.
pub trait DrugDataProvider {
    fn drug_record(&self, drug_name: &str, age: u32, weight_kg: f64) -> DoseResult<Option<DrugRecord>>;
}

pub struct StaticFormulary {
    records: HashMap<String, DrugRecord>,
}

impl StaticFormulary {
    pub fn builtin() -> Self {
        // Built-in records are known-good; validation only guards file input.
        let mut records = HashMap::new();
        for record in builtin::builtin_records() {
            records.insert(record.drug_name.to_lowercase(), record);
        }
        Self { records }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> DoseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<DrugRecord> = serde_json::from_str(&content)?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<DrugRecord>) -> DoseResult<Self> {
        let mut map = HashMap::new();

        for record in records {
            record.validate()?;
            map.insert(record.drug_name.to_lowercase(), record);
        }

        Ok(Self { records: map })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DrugDataProvider for StaticFormulary {
    fn drug_record(&self, drug_name: &str, age: u32, weight_kg: f64) -> DoseResult<Option<DrugRecord>> {
        debug!(
            "Looking up formulary record for {} (patient age {}, weight {} kg)",
            drug_name, age, weight_kg
        );

        Ok(self.records.get(&drug_name.trim().to_lowercase()).cloned())
    }
}
