// Tue Jan 13 2026 - Alex

use crate::pattern::{Motif, PatternError};
use regex::bytes::Regex;

/// A motif matcher with one of two overlap policies.
///
/// `NonOverlapping` reports leftmost matches and resumes after the end of each
/// one, so a base belongs to at most one match. `Overlapping` tests every start
/// offset independently and therefore reports a superset of `NonOverlapping`.
#[derive(Debug, Clone)]
pub enum MatchEngine {
    NonOverlapping { motif: Motif, regex: Regex },
    Overlapping { motif: Motif },
}

impl MatchEngine {
    pub fn non_overlapping(motif: Motif) -> Result<Self, PatternError> {
        let regex = Regex::new(&motif.to_regex())?;
        Ok(Self::NonOverlapping { motif, regex })
    }

    pub fn overlapping(motif: Motif) -> Self {
        Self::Overlapping { motif }
    }

    pub fn motif(&self) -> &Motif {
        match self {
            Self::NonOverlapping { motif, .. } | Self::Overlapping { motif } => motif,
        }
    }

    pub fn is_overlapping(&self) -> bool {
        matches!(self, Self::Overlapping { .. })
    }

    pub fn width(&self) -> usize {
        self.motif().len()
    }

    pub fn find_iter<'e, 'h>(&'e self, haystack: &'h [u8]) -> Matches<'e, 'h> {
        let inner = match self {
            Self::NonOverlapping { regex, .. } => MatchesInner::Regex(regex.find_iter(haystack)),
            Self::Overlapping { motif } => MatchesInner::Window {
                motif,
                haystack,
                pos: 0,
            },
        };
        Matches { inner }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotifMatch<'h> {
    pub offset: usize,
    pub window: &'h [u8],
}

pub struct Matches<'e, 'h> {
    inner: MatchesInner<'e, 'h>,
}

enum MatchesInner<'e, 'h> {
    Regex(regex::bytes::Matches<'e, 'h>),
    Window {
        motif: &'e Motif,
        haystack: &'h [u8],
        pos: usize,
    },
}

impl<'e, 'h> Iterator for Matches<'e, 'h> {
    type Item = MotifMatch<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            MatchesInner::Regex(matches) => matches.next().map(|m| MotifMatch {
                offset: m.start(),
                window: m.as_bytes(),
            }),
            MatchesInner::Window { motif, haystack, pos } => {
                let hay: &'h [u8] = haystack;
                let width = motif.len();
                while *pos + width <= hay.len() {
                    let at = *pos;
                    *pos += 1;
                    let window = &hay[at..at + width];
                    if motif.matches(window) {
                        return Some(MotifMatch { offset: at, window });
                    }
                }
                None
            }
        }
    }
}
