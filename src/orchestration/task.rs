// Tue Jan 13 2026 - Alex

use crate::orchestration::ScanError;
use crate::pattern::MatcherPair;
use crate::sequence::{Region, SequenceProvider};
use crate::site::{extract, GuideSite, Strand};
use std::fmt;

/// One unit of scan work: a half-open region on one strand. Also the key used
/// to match collected results back to input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionTask {
    pub contig: String,
    pub start0: u64,
    pub end1: u64,
    pub strand: Strand,
}

impl RegionTask {
    pub fn new(region: &Region, strand: Strand) -> Self {
        Self {
            contig: region.contig.clone(),
            start0: region.start0,
            end1: region.end1,
            strand,
        }
    }

    /// `+` then `-` for one region.
    pub fn pair(region: &Region) -> [Self; 2] {
        [Self::new(region, Strand::Plus), Self::new(region, Strand::Minus)]
    }

    pub fn expand(regions: &[Region]) -> Vec<Self> {
        regions.iter().flat_map(Self::pair).collect()
    }

    pub fn len(&self) -> u64 {
        self.end1.saturating_sub(self.start0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for RegionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}_{}", self.contig, self.start0, self.end1, self.strand)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub task: RegionTask,
    pub sites: Vec<GuideSite>,
}

impl RegionTask {
    /// Fetches the region and extracts its sites. Touches nothing but the
    /// read-only provider and matchers, so it can run on any worker.
    pub fn run(
        &self,
        provider: &dyn SequenceProvider,
        matchers: &MatcherPair,
        max_g_content: usize,
    ) -> Result<ScanResult, ScanError> {
        let sequence = provider
            .fetch(&self.contig, self.start0, self.end1)?
            .to_ascii_uppercase();

        let mut sites = extract(
            &self.contig,
            &sequence,
            self.start0,
            self.strand,
            matchers.for_strand(self.strand),
            max_g_content,
        );
        let found = sites.by_ref().collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Task {}: {} sites kept, {} over the G limit",
            self,
            found.len(),
            sites.filtered()
        );

        Ok(ScanResult {
            task: self.clone(),
            sites: found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_patterns;
    use crate::sequence::SequenceError;
    use crate::utils::testing::{test_store, TEST_CONTIG};

    fn region(start0: u64, end1: u64) -> Region {
        Region {
            contig: TEST_CONTIG.to_string(),
            start0,
            end1,
        }
    }

    #[test]
    fn test_expand_orders_plus_first() {
        let tasks = RegionTask::expand(&[region(0, 240), region(10, 50)]);
        let strands: Vec<_> = tasks.iter().map(|t| t.strand).collect();

        assert_eq!(strands, vec![Strand::Plus, Strand::Minus, Strand::Plus, Strand::Minus]);
        assert_eq!(tasks[2].start0, 10);
        assert_eq!(tasks[0].to_string(), "test_a_0_240_+");
    }

    #[test]
    fn test_run_both_strands() {
        let store = test_store();
        let matchers = compile_patterns("block", false).unwrap();
        let [plus, minus] = RegionTask::pair(&region(0, 240));

        let plus_result = plus.run(&store, &matchers, 15).unwrap();
        assert_eq!(plus_result.task, plus);
        assert_eq!(plus_result.sites.len(), 1);
        assert_eq!(plus_result.sites[0].start, 1);

        let minus_result = minus.run(&store, &matchers, 15).unwrap();
        assert_eq!(minus_result.sites.len(), 1);
        assert_eq!(minus_result.sites[0].strand, Strand::Minus);
        assert_eq!((minus_result.sites[0].start, minus_result.sites[0].end), (240, 221));
    }

    #[test]
    fn test_coordinates_are_genomic() {
        let store = test_store();
        let matchers = compile_patterns("exhaustive", true).unwrap();
        let task = RegionTask::new(&region(3, 60), Strand::Plus);

        let result = task.run(&store, &matchers, 15).unwrap();
        assert_eq!(result.sites.len(), 1);
        assert_eq!(result.sites[0].start, 4);
        assert_eq!(result.sites[0].pam, "TGG");
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let store = test_store();
        let matchers = compile_patterns("block", false).unwrap();
        let task = RegionTask {
            contig: "missing".to_string(),
            start0: 0,
            end1: 100,
            strand: Strand::Plus,
        };

        assert!(matches!(
            task.run(&store, &matchers, 15),
            Err(ScanError::Sequence(SequenceError::NotFound(_)))
        ));
    }
}
