// Tue Jan 13 2026 - Alex

use crate::config::ConfigError;
use crate::pattern::PatternError;
use crate::sequence::SequenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("Failed to start worker pool: {0}")]
    Worker(#[from] rayon::ThreadPoolBuildError),
    #[error("No result was collected for task {0}")]
    MissingResult(String),
}
