// Tue Jan 15 2026 - Alex

pub mod config;
pub mod orchestration;
pub mod pattern;
pub mod sequence;
pub mod site;
pub mod ui;
pub mod utils;

pub use config::{ConfigError, ScanConfig};
pub use orchestration::{ScanCoordinator, ScanError, ScanSummary};
pub use pattern::{compile_patterns, MatcherPair, ScanMode};
pub use sequence::{IndexedFasta, InMemorySequences, SequenceProvider};
pub use site::{extract, GuideSite, Strand};
