use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

mod config;
mod dosing;
mod error;
mod extract;
mod formulary;
mod output;
mod recommend;

use crate::config::CaseFile;
use crate::error::DoseError;
use crate::extract::{EntityExtractor, Lexicon, LexiconExtractor};
use crate::formulary::{DrugDataProvider, StaticFormulary};
use crate::recommend::Recommender;

#[derive(Parser)]
#[command(name = "dose_advisor")]
#[command(about = "Clinical note driven dosage recommendation pipeline")]
struct Cli {
    /// Patient case file path (JSON)
    #[arg(short, long)]
    cases: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Formulary file replacing the built-in drug records (JSON)
    #[arg(short, long)]
    formulary: Option<PathBuf>,

    /// Lexicon file replacing the built-in extraction terms (JSON)
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), DoseError> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    // Load patient cases
    let case_file = CaseFile::from_file(&cli.cases)?;
    info!("Loaded {} patient cases from {:?}", case_file.cases.len(), cli.cases);

    let extractor: Box<dyn EntityExtractor> = match &cli.lexicon {
        Some(path) => {
            let lexicon = Lexicon::from_file(path)?;
            info!("Loaded extraction lexicon from {:?}", path);
            Box::new(LexiconExtractor::new(lexicon))
        }
        None => Box::new(LexiconExtractor::builtin()),
    };

    let provider: Box<dyn DrugDataProvider> = match &cli.formulary {
        Some(path) => {
            let formulary = StaticFormulary::from_file(path)?;
            if formulary.is_empty() {
                warn!("Formulary {:?} contains no records; every case will fail", path);
            }
            info!("Loaded {} formulary records from {:?}", formulary.len(), path);
            Box::new(formulary)
        }
        None => Box::new(StaticFormulary::builtin()),
    };

    // Run recommendations
    let recommender = Recommender::new(extractor, provider);
    let (recommendations, failures) = recommender.recommend_all(&case_file.cases);

    // Create output directory if it doesn't exist
    std::fs::create_dir_all(&cli.output)?;

    // Save results
    output::save_results(&recommendations, &failures, &cli.output)?;
    output::generate_report(&recommendations, &failures, &cli.output)?;
    info!("Results saved to {:?}", cli.output);

    Ok(())
}
