// Tue Jan 13 2026 - Alex

use crate::site::GuideSite;
use ahash::AHashMap;

/// Occurrence count of every 20-nt guide sequence across the whole scan,
/// both strands pooled.
#[derive(Debug, Default, Clone)]
pub struct UniquenessTable {
    counts: AHashMap<String, usize>,
}

impl UniquenessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sites<'a, I>(sites: I) -> Self
    where
        I: IntoIterator<Item = &'a GuideSite>,
    {
        let mut table = Self::new();
        table.extend(sites);
        table
    }

    pub fn add(&mut self, site: &GuideSite) {
        *self.counts.entry(site.seq.clone()).or_insert(0) += 1;
    }

    pub fn extend<'a, I>(&mut self, sites: I)
    where
        I: IntoIterator<Item = &'a GuideSite>,
    {
        for site in sites {
            self.add(site);
        }
    }

    pub fn occurrences(&self, seq: &str) -> usize {
        self.counts.get(seq).copied().unwrap_or(0)
    }

    /// True when the guide sequence was seen exactly once.
    pub fn is_unique(&self, seq: &str) -> bool {
        self.occurrences(seq) == 1
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
