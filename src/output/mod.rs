use crate::error::DoseResult;
use crate::recommend::{CaseFailure, Recommendation, RunSummary};
use chrono::Utc;
use std::path::Path;
use std::fs::File;
use log::info;

pub fn save_results<P: AsRef<Path>>(
    recommendations: &[Recommendation],
    failures: &[CaseFailure],
    output_dir: P,
) -> DoseResult<()> {
    let output_path = output_dir.as_ref();

    // Save per-case dosage summary
    save_recommendation_data(recommendations, &output_path.join("recommendations.csv"))?;

    // Save extracted entities in long format
    save_insight_data(recommendations, &output_path.join("insights.csv"))?;

    // Save failed cases
    save_failure_data(failures, &output_path.join("failures.csv"))?;

    // Save full results including rationale trails
    save_full_results(recommendations, &output_path.join("recommendations.json"))?;

    // Save run summary
    let summary = RunSummary::from_results(recommendations, failures.len());
    save_run_summary(&summary, &output_path.join("run_summary.json"))?;

    info!("All results saved to {:?}", output_path);
    Ok(())
}

fn save_recommendation_data<P: AsRef<Path>>(recommendations: &[Recommendation], path: P) -> DoseResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.write_record([
        "CASE_ID", "DRUG", "AGE", "WEIGHT_KG", "FINAL_DOSAGE_MG", "DEGRADED_EXTRACTION",
    ])?;

    // Write data
    for recommendation in recommendations {
        writer.write_record([
            recommendation.case_id.to_string(),
            recommendation.drug_name.clone(),
            recommendation.age.to_string(),
            recommendation.weight_kg.to_string(),
            format!("{:.2}", recommendation.dosage.final_dosage_mg),
            recommendation.extraction_degraded.is_some().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn save_insight_data<P: AsRef<Path>>(recommendations: &[Recommendation], path: P) -> DoseResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.write_record(["CASE_ID", "CATEGORY", "TERM"])?;

    // Write data
    for recommendation in recommendations {
        let categories = [
            ("disease", &recommendation.insights.diseases),
            ("symptom", &recommendation.insights.symptoms),
            ("drug", &recommendation.insights.drugs),
        ];

        for (category, terms) in categories {
            for term in terms {
                writer.write_record([
                    recommendation.case_id.to_string(),
                    category.to_string(),
                    term.clone(),
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn save_failure_data<P: AsRef<Path>>(failures: &[CaseFailure], path: P) -> DoseResult<()> {
    if failures.is_empty() {
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.write_record(["CASE_ID", "DRUG", "ERROR"])?;

    // Write data
    for failure in failures {
        writer.write_record([
            failure.case_id.to_string(),
            failure.drug_name.clone(),
            failure.error.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn save_full_results<P: AsRef<Path>>(recommendations: &[Recommendation], path: P) -> DoseResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, recommendations)?;
    Ok(())
}

fn save_run_summary<P: AsRef<Path>>(summary: &RunSummary, path: P) -> DoseResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

/// Generate a human-readable run report
pub fn generate_report<P: AsRef<Path>>(
    recommendations: &[Recommendation],
    failures: &[CaseFailure],
    output_dir: P,
) -> DoseResult<()> {
    let output_path = output_dir.as_ref();
    let report_path = output_path.join("report.md");

    let summary = RunSummary::from_results(recommendations, failures.len());

    let report_content = format!(
        r#"# Dosage Recommendation Report

Generated: {}

## Run Overview
- **Cases processed**: {}
- **Recommendations produced**: {}
- **Failed cases**: {}
- **Degraded extractions**: {}

## Final Dosage (mg)
- Mean: {:.2}
- SD: {:.2}
- Min: {:.2}
- Max: {:.2}

## Files Generated
- `recommendations.csv`: Per-case dosage summary
- `insights.csv`: Entities extracted from clinical notes
- `failures.csv`: Cases that produced no dosage (written only when present)
- `recommendations.json`: Full results including rationale trails
- `run_summary.json`: Aggregate run statistics

## Notes
Dosage figures come from mocked formulary records and simple multiplicative
adjustment rules. They are demonstration output, not clinical guidance.
"#,
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
        summary.n_cases,
        summary.n_recommended,
        summary.n_failed,
        summary.n_degraded_extractions,
        summary.dosage.mean_mg,
        summary.dosage.sd_mg,
        summary.dosage.min_mg,
        summary.dosage.max_mg,
    );

    std::fs::write(report_path, report_content)?;
    Ok(())
}
