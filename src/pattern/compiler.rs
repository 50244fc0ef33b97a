// Tue Jan 13 2026 - Alex

use crate::pattern::{MatchEngine, Motif, PatternError, GUIDE_LEN};
use crate::site::Strand;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Non-overlapping matches; fast but may miss sites that overlap a previous hit.
    Block,
    /// Every start offset is tested.
    Exhaustive,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Exhaustive => "exhaustive",
        }
    }
}

impl Default for ScanMode {
    fn default() -> Self {
        Self::Exhaustive
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "exhaustive" => Ok(Self::Exhaustive),
            other => Err(PatternError::Config(format!(
                "only exhaustive and block are valid scan modes, got '{}'",
                other
            ))),
        }
    }
}

/// Sense and antisense matchers for one scan configuration. Read-only once built.
#[derive(Debug, Clone)]
pub struct MatcherPair {
    pub mode: ScanMode,
    pub sense: MatchEngine,
    pub antisense: MatchEngine,
}

impl MatcherPair {
    pub fn for_strand(&self, strand: Strand) -> &MatchEngine {
        match strand {
            Strand::Plus => &self.sense,
            Strand::Minus => &self.antisense,
        }
    }
}

pub struct PatternCompiler {
    allow_noncanonical: bool,
    allow_n: bool,
}

impl PatternCompiler {
    pub fn new() -> Self {
        Self {
            allow_noncanonical: false,
            allow_n: false,
        }
    }

    pub fn allow_noncanonical(mut self, allow: bool) -> Self {
        self.allow_noncanonical = allow;
        self
    }

    pub fn allow_n(mut self, allow: bool) -> Self {
        self.allow_n = allow;
        self
    }

    /// `G` + 17 wildcards (or 18 wildcards) + `GG` + 1 wildcard + `GG`.
    pub fn sense_motif(&self) -> Motif {
        let n = self.allow_n;
        let guide = if self.allow_noncanonical {
            Motif::new().any(GUIDE_LEN - 2, n)
        } else {
            Motif::new().fixed(b"G").any(GUIDE_LEN - 3, n)
        };
        guide.fixed(b"GG").any(1, n).fixed(b"GG")
    }

    /// Reverse-complement shape of the sense motif, PAM first.
    pub fn antisense_motif(&self) -> Motif {
        let n = self.allow_n;
        let head = Motif::new().fixed(b"CC").any(1, n).fixed(b"CC");
        if self.allow_noncanonical {
            head.any(GUIDE_LEN - 2, n)
        } else {
            head.any(GUIDE_LEN - 3, n).fixed(b"C")
        }
    }

    pub fn compile(&self, mode: ScanMode) -> Result<MatcherPair, PatternError> {
        let (sense, antisense) = match mode {
            ScanMode::Block => (
                MatchEngine::non_overlapping(self.sense_motif())?,
                MatchEngine::non_overlapping(self.antisense_motif())?,
            ),
            ScanMode::Exhaustive => (
                MatchEngine::overlapping(self.sense_motif()),
                MatchEngine::overlapping(self.antisense_motif()),
            ),
        };

        log::debug!(
            "Compiled {} matchers: sense={} antisense={}",
            mode,
            sense.motif(),
            antisense.motif()
        );

        Ok(MatcherPair {
            mode,
            sense,
            antisense,
        })
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the matcher pair from a textual scan mode (`block` or `exhaustive`).
pub fn compile_patterns(scan_mode: &str, allow_noncanonical: bool) -> Result<MatcherPair, PatternError> {
    let mode: ScanMode = scan_mode.parse()?;
    PatternCompiler::new()
        .allow_noncanonical(allow_noncanonical)
        .compile(mode)
}
