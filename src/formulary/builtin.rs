use super::{AgeRule, DrugRecord, SafetyProfiles};

/// Mock records standing in for a clinical drug-information service.
/// Dosage figures are placeholders, not clinical guidance.
pub fn builtin_records() -> Vec<DrugRecord> {
    vec![
        DrugRecord {
            drug_name: "Amoxicillin".to_string(),
            base_dosage_per_kg: 50.0,
            age_modifications: standard_age_rules(),
            safety_profiles: SafetyProfiles {
                renal_impairment_factor: 0.5,
                liver_impairment_factor: 0.6,
            },
        },
        DrugRecord {
            drug_name: "Lisinopril".to_string(),
            base_dosage_per_kg: 50.0,
            age_modifications: standard_age_rules(),
            safety_profiles: SafetyProfiles {
                renal_impairment_factor: 0.5,
                liver_impairment_factor: 0.6,
            },
        },
    ]
}

// The adult row carries no bounds: ages 13-64 take the base dosage unchanged.
fn standard_age_rules() -> Vec<AgeRule> {
    vec![
        AgeRule {
            age_group: "pediatric (0-12 yrs)".to_string(),
            min_age: None,
            max_age: Some(12),
            factor: 0.6,
            notes: "Reduced dosage due to immature liver function.".to_string(),
        },
        AgeRule {
            age_group: "geriatric (65+ yrs)".to_string(),
            min_age: Some(65),
            max_age: None,
            factor: 0.75,
            notes: "Start with lower dose due to decreased renal clearance.".to_string(),
        },
        AgeRule {
            age_group: "adult (13-64 yrs)".to_string(),
            min_age: None,
            max_age: None,
            factor: 1.0,
            notes: "Standard dosage.".to_string(),
        },
    ]
}
