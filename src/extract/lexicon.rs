use serde::{Deserialize, Serialize};
use std::path::Path;
use super::{EntityExtractor, HealthInsights, NoteAnalysis};
use crate::error::DoseResult;

/// Term lists backing the lexicon extractor, one per entity category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub diseases: Vec<String>,
    pub symptoms: Vec<String>,
    pub drugs: Vec<String>,
}

impl Lexicon {
    pub fn builtin() -> Self {
        let terms = |list: &[&str]| list.iter().map(|t| t.to_string()).collect();

        Self {
            diseases: terms(&[
                "bacterial infection",
                "hypertension",
                "asthma",
                "diabetes",
                "pneumonia",
                "renal impairment",
            ]),
            symptoms: terms(&[
                "fever",
                "cough",
                "headache",
                "fatigue",
                "shortness of breath",
                "nausea",
            ]),
            drugs: terms(&[
                "amoxicillin",
                "lisinopril",
                "metformin",
                "aspirin",
                "ibuprofen",
            ]),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> DoseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon: Lexicon = serde_json::from_str(&content)?;
        Ok(lexicon)
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty() && self.symptoms.is_empty() && self.drugs.is_empty()
    }
}

/// Substring matcher standing in for a pretrained biomedical NER model.
pub struct LexiconExtractor {
    lexicon: Lexicon,
}

impl LexiconExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl EntityExtractor for LexiconExtractor {
    fn analyze(&self, notes: &str) -> NoteAnalysis {
        // An empty lexicon has nothing to recognize with.
        if self.lexicon.is_empty() {
            return NoteAnalysis::Degraded {
                reason: "extraction lexicon contains no terms".to_string(),
            };
        }

        let lower = notes.to_lowercase();

        NoteAnalysis::Extracted(HealthInsights {
            diseases: match_terms(&lower, &self.lexicon.diseases),
            symptoms: match_terms(&lower, &self.lexicon.symptoms),
            drugs: match_terms(&lower, &self.lexicon.drugs),
        })
    }
}

fn match_terms(lower_notes: &str, terms: &[String]) -> Vec<String> {
    let mut matched = Vec::new();

    for term in terms {
        if lower_notes.contains(&term.to_lowercase()) && !matched.contains(term) {
            matched.push(term.clone());
        }
    }

    matched
}
