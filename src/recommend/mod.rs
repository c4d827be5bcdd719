pub mod summary;

pub use summary::{DosageSummary, RunSummary};

use serde::{Deserialize, Serialize};
use log::{debug, error, info, warn};
use crate::config::PatientCase;
use crate::dosing::{self, DosageResult};
use crate::error::{DoseError, DoseResult};
use crate::extract::{EntityExtractor, HealthInsights};
use crate::formulary::DrugDataProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub case_id: usize,
    pub drug_name: String,
    pub age: u32,
    pub weight_kg: f64,
    pub insights: HealthInsights,
    pub extraction_degraded: Option<String>,
    pub dosage: DosageResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFailure {
    pub case_id: usize,
    pub drug_name: String,
    pub error: String,
}

pub struct Recommender {
    extractor: Box<dyn EntityExtractor>,
    provider: Box<dyn DrugDataProvider>,
}

impl Recommender {
    pub fn new(extractor: Box<dyn EntityExtractor>, provider: Box<dyn DrugDataProvider>) -> Self {
        Self { extractor, provider }
    }

    /// Runs the three pipeline steps for one case: note analysis, formulary
    /// lookup, dosage calculation. A degraded extraction continues with
    /// empty insights; a missing drug record aborts with no dosage.
    pub fn recommend(&self, case_id: usize, case: &PatientCase) -> DoseResult<Recommendation> {
        info!("Analyzing clinical notes for case {}", case_id);
        let analysis = self.extractor.analyze(&case.notes);
        let extraction_degraded = analysis.degraded_reason().map(str::to_string);
        if let Some(reason) = &extraction_degraded {
            warn!("Entity extraction degraded for case {}: {}", case_id, reason);
        }
        let insights = analysis.into_insights();
        if !insights.is_empty() {
            debug!("Insights extracted for case {}: {:?}", case_id, insights);
        }

        let record = self
            .provider
            .drug_record(&case.drug_name, case.age, case.weight_kg)?
            .ok_or_else(|| {
                DoseError::DataUnavailable(format!("no formulary record for {}", case.drug_name))
            })?;

        let dosage = dosing::compute(case.age, case.weight_kg, &record, &case.notes);

        Ok(Recommendation {
            case_id,
            drug_name: record.drug_name.clone(),
            age: case.age,
            weight_kg: case.weight_kg,
            insights,
            extraction_degraded,
            dosage,
        })
    }

    pub fn recommend_all(&self, cases: &[PatientCase]) -> (Vec<Recommendation>, Vec<CaseFailure>) {
        info!("Starting dosage recommendation for {} cases", cases.len());

        let mut recommendations = Vec::with_capacity(cases.len());
        let mut failures = Vec::new();

        for (index, case) in cases.iter().enumerate() {
            let case_id = index + 1;

            match self.recommend(case_id, case) {
                Ok(recommendation) => recommendations.push(recommendation),
                Err(err) => {
                    error!("Case {} ({}) failed: {}", case_id, case.drug_name, err);
                    failures.push(CaseFailure {
                        case_id,
                        drug_name: case.drug_name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            "Recommendation run completed: {} succeeded, {} failed",
            recommendations.len(),
            failures.len()
        );

        (recommendations, failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::NoteAnalysis;
    use crate::formulary::{DrugRecord, StaticFormulary};
    use approx::assert_relative_eq;

    struct DegradedExtractor;

    impl EntityExtractor for DegradedExtractor {
        fn analyze(&self, _notes: &str) -> NoteAnalysis {
            NoteAnalysis::Degraded {
                reason: "model unavailable".to_string(),
            }
        }
    }

    struct EmptyProvider;

    impl DrugDataProvider for EmptyProvider {
        fn drug_record(&self, _drug_name: &str, _age: u32, _weight_kg: f64) -> DoseResult<Option<DrugRecord>> {
            Ok(None)
        }
    }

    fn demo_case() -> PatientCase {
        PatientCase {
            age: 7,
            weight_kg: 25.0,
            drug_name: "Amoxicillin".to_string(),
            notes: "Patient is a 7-year-old with a bacterial infection.".to_string(),
        }
    }

    fn builtin_recommender() -> Recommender {
        Recommender::new(
            Box::new(crate::extract::LexiconExtractor::builtin()),
            Box::new(StaticFormulary::builtin()),
        )
    }

    #[test]
    fn test_recommendation_for_pediatric_case() {
        let recommendation = builtin_recommender().recommend(1, &demo_case()).unwrap();

        // 50 * 25 * 0.6
        assert_relative_eq!(recommendation.dosage.final_dosage_mg, 750.0);
        assert!(recommendation.extraction_degraded.is_none());
        assert_eq!(
            recommendation.insights.diseases,
            vec!["bacterial infection".to_string()]
        );
    }

    #[test]
    fn test_missing_record_aborts_with_data_unavailable() {
        let mut case = demo_case();
        case.drug_name = "Unknownium".to_string();

        let err = builtin_recommender().recommend(1, &case).unwrap_err();
        assert!(matches!(err, DoseError::DataUnavailable(_)));
    }

    #[test]
    fn test_degraded_extraction_still_produces_dosage() {
        let recommender = Recommender::new(
            Box::new(DegradedExtractor),
            Box::new(StaticFormulary::builtin()),
        );

        let recommendation = recommender.recommend(1, &demo_case()).unwrap();
        assert!(recommendation.extraction_degraded.is_some());
        assert!(recommendation.insights.is_empty());
        assert_relative_eq!(recommendation.dosage.final_dosage_mg, 750.0);
    }

    #[test]
    fn test_provider_without_records_never_yields_dosage() {
        let recommender = Recommender::new(
            Box::new(crate::extract::LexiconExtractor::builtin()),
            Box::new(EmptyProvider),
        );

        let err = recommender.recommend(1, &demo_case()).unwrap_err();
        assert!(matches!(err, DoseError::DataUnavailable(_)));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let mut failing_case = demo_case();
        failing_case.drug_name = "Unknownium".to_string();

        let (recommendations, failures) =
            builtin_recommender().recommend_all(&[demo_case(), failing_case, demo_case()]);

        assert_eq!(recommendations.len(), 2);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].case_id, 2);
        assert_eq!(recommendations[0].case_id, 1);
        assert_eq!(recommendations[1].case_id, 3);
    }
}
