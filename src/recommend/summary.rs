use super::Recommendation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub n_cases: usize,
    pub n_recommended: usize,
    pub n_failed: usize,
    pub n_degraded_extractions: usize,
    pub dosage: DosageSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DosageSummary {
    pub mean_mg: f64,
    pub sd_mg: f64,
    pub min_mg: f64,
    pub max_mg: f64,
}

impl RunSummary {
    pub fn from_results(results: &[Recommendation], n_failed: usize) -> Self {
        let dosages: Vec<f64> = results
            .iter()
            .map(|r| r.dosage.final_dosage_mg)
            .collect();

        let min_mg = if dosages.is_empty() {
            0.0
        } else {
            dosages.iter().cloned().fold(f64::INFINITY, f64::min)
        };

        Self {
            n_cases: results.len() + n_failed,
            n_recommended: results.len(),
            n_failed,
            n_degraded_extractions: results
                .iter()
                .filter(|r| r.extraction_degraded.is_some())
                .count(),
            dosage: DosageSummary {
                mean_mg: mean(&dosages),
                sd_mg: std_dev(&dosages),
                min_mg,
                max_mg: dosages.iter().cloned().fold(0.0, f64::max),
            },
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        0.0
    } else {
        let mean_val = mean(values);
        let variance = values.iter()
            .map(|v| (v - mean_val).powi(2))
            .sum::<f64>() / (values.len() - 1) as f64;
        variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosing::DosageResult;
    use crate::extract::HealthInsights;
    use approx::assert_relative_eq;

    fn recommendation(case_id: usize, dosage_mg: f64, degraded: bool) -> Recommendation {
        Recommendation {
            case_id,
            drug_name: "Amoxicillin".to_string(),
            age: 30,
            weight_kg: 70.0,
            insights: HealthInsights::default(),
            extraction_degraded: degraded.then(|| "model unavailable".to_string()),
            dosage: DosageResult {
                final_dosage_mg: dosage_mg,
                rationale: vec![],
            },
        }
    }

    #[test]
    fn test_summary_counts_and_statistics() {
        let results = vec![
            recommendation(1, 750.0, false),
            recommendation(2, 1250.0, true),
        ];

        let summary = RunSummary::from_results(&results, 1);
        assert_eq!(summary.n_cases, 3);
        assert_eq!(summary.n_recommended, 2);
        assert_eq!(summary.n_failed, 1);
        assert_eq!(summary.n_degraded_extractions, 1);
        assert_relative_eq!(summary.dosage.mean_mg, 1000.0);
        assert_relative_eq!(summary.dosage.min_mg, 750.0);
        assert_relative_eq!(summary.dosage.max_mg, 1250.0);
    }

    #[test]
    fn test_summary_of_empty_results() {
        let summary = RunSummary::from_results(&[], 2);
        assert_eq!(summary.n_cases, 2);
        assert_eq!(summary.n_recommended, 0);
        assert_relative_eq!(summary.dosage.mean_mg, 0.0);
        assert_relative_eq!(summary.dosage.min_mg, 0.0);
        assert_relative_eq!(summary.dosage.max_mg, 0.0);
    }
}
