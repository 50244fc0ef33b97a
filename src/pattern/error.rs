// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid scan configuration: {0}")]
    Config(String),
    #[error("Pattern compilation failed: {0}")]
    Compile(#[from] regex::Error),
}
