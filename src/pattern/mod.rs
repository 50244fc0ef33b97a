// Tue Jan 13 2026 - Alex

pub mod compiler;
pub mod engine;
pub mod error;
pub mod motif;

pub use compiler::{compile_patterns, MatcherPair, PatternCompiler, ScanMode};
pub use engine::{MatchEngine, Matches, MotifMatch};
pub use error::PatternError;
pub use motif::{BaseClass, Motif};

/// Bases in the guide (protospacer) part of a site.
pub const GUIDE_LEN: usize = 20;
/// Bases in the PAM part of a site.
pub const PAM_LEN: usize = 3;
/// Full motif window: guide followed by PAM.
pub const SITE_LEN: usize = GUIDE_LEN + PAM_LEN;
