pub mod lexicon;

pub use lexicon::{Lexicon, LexiconExtractor};

use serde::{Deserialize, Serialize};

/// Categorized entities extracted from a clinical note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthInsights {
    pub diseases: Vec<String>,
    pub symptoms: Vec<String>,
    pub drugs: Vec<String>,
}

impl HealthInsights {
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty() && self.symptoms.is_empty() && self.drugs.is_empty()
    }
}

/// Extraction outcome. A failing extractor degrades to `Degraded` with a
/// reason instead of erroring; the pipeline continues with empty insights.
#[derive(Debug, Clone)]
pub enum NoteAnalysis {
    Extracted(HealthInsights),
    Degraded { reason: String },
}

impl NoteAnalysis {
    pub fn into_insights(self) -> HealthInsights {
        match self {
            NoteAnalysis::Extracted(insights) => insights,
            NoteAnalysis::Degraded { .. } => HealthInsights::default(),
        }
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            NoteAnalysis::Extracted(_) => None,
            NoteAnalysis::Degraded { reason } => Some(reason),
        }
    }
}

pub trait EntityExtractor {
    fn analyze(&self, notes: &str) -> NoteAnalysis;
}
