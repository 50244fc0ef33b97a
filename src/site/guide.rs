// Wed Jan 15 2026 - Alex

use crate::pattern::{GUIDE_LEN, PAM_LEN, SITE_LEN};
use crate::sequence::{g_count, reverse_complement, SequenceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reference strand on which a motif was physically found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    pub fn as_char(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A candidate gRNA site in guide orientation.
///
/// `start`/`end` are 1-based. Minus-strand sites keep the existing numbering
/// where `start = end + 19`, so `start > end` for them.
#[derive(Debug, Clone)]
pub struct GuideSite {
    pub contig: String,
    pub start: u64,
    pub end: u64,
    pub seq: String,
    pub pam: String,
    pub strand: Strand,
    pub g_count: usize,
}

impl GuideSite {
    /// Builds a site from a 23-base motif window found `offset` bases into a
    /// region that starts at 0-based `region_start0`.
    pub fn from_window(
        contig: &str,
        region_start0: u64,
        strand: Strand,
        offset: usize,
        window: &[u8],
    ) -> Result<Self, SequenceError> {
        if window.len() != SITE_LEN {
            return Err(SequenceError::range(
                contig,
                region_start0 + offset as u64,
                region_start0 + (offset + window.len()) as u64,
                format!("motif window must be {} bases", SITE_LEN),
            ));
        }

        let (seq, pam, start, end) = match strand {
            Strand::Plus => {
                let seq = String::from_utf8_lossy(&window[..GUIDE_LEN]).into_owned();
                let pam = String::from_utf8_lossy(&window[GUIDE_LEN..]).into_owned();
                let start = region_start0 + offset as u64 + 1;
                (seq, pam, start, start + GUIDE_LEN as u64 - 1)
            }
            Strand::Minus => {
                let seq = reverse_complement(&window[PAM_LEN..])?;
                let pam = reverse_complement(&window[..PAM_LEN])?;
                let end = region_start0 + offset as u64 + PAM_LEN as u64 + 1;
                (seq, pam, end + GUIDE_LEN as u64 - 1, end)
            }
        };

        Ok(Self {
            contig: contig.to_string(),
            start,
            end,
            g_count: g_count(&seq),
            seq,
            pam,
            strand,
        })
    }

    pub fn g_start(&self) -> bool {
        self.seq.starts_with('G')
    }
}

impl PartialEq for GuideSite {
    fn eq(&self, other: &Self) -> bool {
        self.contig == other.contig
            && self.start == other.start
            && self.end == other.end
            && self.seq == other.seq
            && self.pam == other.pam
            && self.strand == other.strand
    }
}

impl Eq for GuideSite {}

impl Hash for GuideSite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contig.hash(state);
        self.start.hash(state);
        self.end.hash(state);
        self.seq.hash(state);
        self.pam.hash(state);
        self.strand.hash(state);
    }
}

impl fmt::Display for GuideSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.contig,
            self.start,
            self.end,
            self.seq,
            self.pam,
            self.strand,
            if self.g_start() { "True" } else { "False" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_window() {
        let site = GuideSite::from_window("test_a", 0, Strand::Plus, 3, b"AAGACTATTTCCGTAGGAGGTGG").unwrap();

        assert_eq!(site.seq, "AAGACTATTTCCGTAGGAGG");
        assert_eq!(site.pam, "TGG");
        assert_eq!((site.start, site.end), (4, 23));
        assert!(!site.g_start());
        assert_eq!(site.to_string(), "test_a,4,23,AAGACTATTTCCGTAGGAGG,TGG,+,False");
    }

    #[test]
    fn test_minus_window_keeps_flipped_numbering() {
        let site = GuideSite::from_window("test_a", 0, Strand::Minus, 217, b"CCTCCTACGGAAATAGTCTTCTC").unwrap();

        assert_eq!(site.seq, "GAGAAGACTATTTCCGTAGG");
        assert_eq!(site.pam, "AGG");
        assert_eq!(site.end, 221);
        assert_eq!(site.start, 240);
        assert!(site.g_start());
        assert_eq!(site.g_count, 6);
    }

    #[test]
    fn test_region_offset_applied() {
        let site = GuideSite::from_window("chr2", 1000, Strand::Plus, 5, b"GAGAAGACTATTTCCGTAGGAGG").unwrap();
        assert_eq!((site.start, site.end), (1006, 1025));
    }

    #[test]
    fn test_equality_ignores_derived_fields() {
        let a = GuideSite::from_window("c", 0, Strand::Plus, 0, b"GAGAAGACTATTTCCGTAGGAGG").unwrap();
        let mut b = a.clone();
        b.g_count = 0;
        assert_eq!(a, b);

        b.strand = Strand::Minus;
        assert_ne!(a, b);
    }

    #[test]
    fn test_bad_window() {
        assert!(GuideSite::from_window("c", 0, Strand::Plus, 0, b"GGG").is_err());
        assert!(matches!(
            GuideSite::from_window("c", 0, Strand::Minus, 0, b"CCXCCAAAAAAAAAAAAAAAAAA"),
            Err(SequenceError::InvalidBase('X'))
        ));
    }
}
