// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Contig [{0}] not found in the FASTA index")]
    NotFound(String),
    #[error("Invalid range {contig}:{start}-{end}: {reason}")]
    Range {
        contig: String,
        start: u64,
        end: u64,
        reason: String,
    },
    #[error("Invalid base '{0}' in sequence")]
    InvalidBase(char),
    #[error("Failed to fetch {contig}:{start}-{end}: {reason}")]
    Fetch {
        contig: String,
        start: u64,
        end: u64,
        reason: String,
    },
    #[error("FASTA index error: {0}")]
    Index(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SequenceError {
    pub fn range(contig: &str, start: u64, end: u64, reason: impl Into<String>) -> Self {
        Self::Range {
            contig: contig.to_string(),
            start,
            end,
            reason: reason.into(),
        }
    }

    pub fn fetch(contig: &str, start: u64, end: u64, reason: impl Into<String>) -> Self {
        Self::Fetch {
            contig: contig.to_string(),
            start,
            end,
            reason: reason.into(),
        }
    }
}
