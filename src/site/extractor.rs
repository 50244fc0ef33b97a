// Wed Jan 15 2026 - Alex

use crate::pattern::{MatchEngine, Matches};
use crate::sequence::SequenceError;
use crate::site::{GuideSite, Strand};

/// Walks the matches of one engine over a region and turns them into sites.
pub struct SiteExtractor<'a> {
    contig: &'a str,
    region_start0: u64,
    strand: Strand,
    engine: &'a MatchEngine,
    max_g_content: usize,
}

impl<'a> SiteExtractor<'a> {
    pub fn new(contig: &'a str, region_start0: u64, strand: Strand, engine: &'a MatchEngine) -> Self {
        Self {
            contig,
            region_start0,
            strand,
            engine,
            max_g_content: 15,
        }
    }

    pub fn with_max_g_content(mut self, max: usize) -> Self {
        self.max_g_content = max;
        self
    }

    /// `sequence` is the upper-cased forward strand of the region; the minus
    /// strand is found through the antisense engine, not a reverse-complemented copy.
    pub fn sites(&self, sequence: &'a [u8]) -> Sites<'a> {
        Sites {
            matches: self.engine.find_iter(sequence),
            contig: self.contig,
            region_start0: self.region_start0,
            strand: self.strand,
            max_g_content: self.max_g_content,
            filtered: 0,
        }
    }
}

/// Lazy site iterator. Sites above the G threshold are skipped and counted.
pub struct Sites<'a> {
    matches: Matches<'a, 'a>,
    contig: &'a str,
    region_start0: u64,
    strand: Strand,
    max_g_content: usize,
    filtered: usize,
}

impl<'a> Sites<'a> {
    /// Number of matches dropped so far by the G-content filter.
    pub fn filtered(&self) -> usize {
        self.filtered
    }
}

impl<'a> Iterator for Sites<'a> {
    type Item = Result<GuideSite, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let m = self.matches.next()?;
            match GuideSite::from_window(self.contig, self.region_start0, self.strand, m.offset, m.window) {
                Ok(site) if site.g_count > self.max_g_content => {
                    self.filtered += 1;
                }
                other => return Some(other),
            }
        }
    }
}

pub fn extract<'a>(
    contig: &'a str,
    sequence: &'a str,
    region_offset0: u64,
    strand: Strand,
    engine: &'a MatchEngine,
    max_g_content: usize,
) -> Sites<'a> {
    SiteExtractor::new(contig, region_offset0, strand, engine)
        .with_max_g_content(max_g_content)
        .sites(sequence.as_bytes())
}
