use serde::{Deserialize, Serialize};
use crate::formulary::DrugRecord;

const RENAL_MARKERS: [&str; 2] = ["renal impairment", "kidney issues"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosageResult {
    pub final_dosage_mg: f64,
    pub rationale: Vec<String>,
}

/// Weight-based dosage with a short chain of multiplicative adjustments:
/// at most one age rule (first match in listed order), then the renal
/// safety factor when the note text mentions renal trouble.
pub fn compute(age: u32, weight_kg: f64, record: &DrugRecord, notes: &str) -> DosageResult {
    let mut rationale = Vec::new();

    let base_dosage_mg = record.base_dosage_per_kg * weight_kg;
    let mut final_dosage_mg = base_dosage_mg;
    rationale.push(format!(
        "Base dosage calculated for patient weight ({} kg) is {:.2} mg.",
        weight_kg, base_dosage_mg
    ));

    for rule in &record.age_modifications {
        if rule.matches(age) {
            final_dosage_mg *= rule.factor;
            rationale.push(format!(
                "Applied age-specific adjustment ({}) based on patient's age. {}",
                rule.factor, rule.notes
            ));
            break;
        }
    }

    if mentions_renal_impairment(notes) {
        let renal_factor = record.safety_profiles.renal_impairment_factor;
        final_dosage_mg *= renal_factor;
        rationale.push(format!(
            "Further reduced dosage by {} due to signs of renal impairment found in notes.",
            renal_factor
        ));
    }

    DosageResult {
        final_dosage_mg: round2(final_dosage_mg),
        rationale,
    }
}

fn mentions_renal_impairment(notes: &str) -> bool {
    let lower = notes.to_lowercase();
    RENAL_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
