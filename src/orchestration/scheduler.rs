// Tue Jan 13 2026 - Alex

use crate::orchestration::{RegionTask, ScanError, ScanResult};
use crate::pattern::MatcherPair;
use crate::sequence::SequenceProvider;
use crate::site::GuideSite;
use crate::ui::progress::TaskProgress;
use ahash::AHashMap;
use std::sync::mpsc;

/// Per-task sites, keyed by the task that produced them.
pub type CollectedResults = AHashMap<RegionTask, Vec<GuideSite>>;

/// Runs region tasks either inline or on a fixed-size worker pool.
pub struct TaskScheduler {
    workers: usize,
}

impl TaskScheduler {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs tasks in input order on the calling thread, handing each result to
    /// `sink` before starting the next task.
    pub fn run_sequential<F>(
        &self,
        provider: &dyn SequenceProvider,
        tasks: &[RegionTask],
        matchers: &MatcherPair,
        max_g_content: usize,
        mut sink: F,
    ) -> Result<(), ScanError>
    where
        F: FnMut(ScanResult) -> Result<(), ScanError>,
    {
        for task in tasks {
            let result = task.run(provider, matchers, max_g_content)?;
            sink(result)?;
        }
        Ok(())
    }

    /// Runs every task on the pool and gathers the results by key. Completion
    /// order is arbitrary; any failure fails the whole run, reporting the
    /// error of the earliest failing task in input order.
    pub fn run_parallel(
        &self,
        provider: &dyn SequenceProvider,
        tasks: &[RegionTask],
        matchers: &MatcherPair,
        max_g_content: usize,
        progress: &TaskProgress,
    ) -> Result<CollectedResults, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("ngg2-worker-{}", i))
            .build()?;

        log::debug!("Dispatching {} tasks to {} workers", tasks.len(), self.workers);

        let (tx, rx) = mpsc::channel();
        pool.scope(|scope| {
            for (index, task) in tasks.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = task.run(provider, matchers, max_g_content);
                    progress.increment();
                    let _ = tx.send((index, result));
                });
            }
        });
        drop(tx);

        let mut collected = CollectedResults::with_capacity(tasks.len());
        let mut first_error: Option<(usize, ScanError)> = None;
        for (index, result) in rx {
            match result {
                Ok(ScanResult { task, sites }) => {
                    collected.insert(task, sites);
                }
                Err(e) => {
                    log::debug!("Task {} failed: {}", tasks[index], e);
                    if first_error.as_ref().map_or(true, |(earliest, _)| index < *earliest) {
                        first_error = Some((index, e));
                    }
                }
            }
        }

        match first_error {
            Some((_, e)) => Err(e),
            None => Ok(collected),
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_patterns;
    use crate::sequence::{Region, SequenceError};
    use crate::utils::testing::{test_store, TEST_CONTIG};

    fn tasks() -> Vec<RegionTask> {
        let regions: Vec<Region> = [(0, 240), (0, 120), (100, 240)]
            .iter()
            .map(|&(start0, end1)| Region {
                contig: TEST_CONTIG.to_string(),
                start0,
                end1,
            })
            .collect();
        RegionTask::expand(&regions)
    }

    #[test]
    fn test_sequential_preserves_order() {
        let store = test_store();
        let matchers = compile_patterns("exhaustive", false).unwrap();
        let tasks = tasks();

        let mut seen = Vec::new();
        TaskScheduler::new(1)
            .run_sequential(&store, &tasks, &matchers, 15, |result| {
                seen.push(result.task);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, tasks);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let store = test_store();
        let matchers = compile_patterns("exhaustive", true).unwrap();
        let tasks = tasks();

        let mut sequential = CollectedResults::new();
        TaskScheduler::new(1)
            .run_sequential(&store, &tasks, &matchers, 15, |result| {
                sequential.insert(result.task, result.sites);
                Ok(())
            })
            .unwrap();

        for workers in [1, 4] {
            let progress = TaskProgress::hidden(tasks.len() as u64);
            let parallel = TaskScheduler::new(workers)
                .run_parallel(&store, &tasks, &matchers, 15, &progress)
                .unwrap();
            assert_eq!(parallel, sequential);
            assert_eq!(progress.position(), tasks.len() as u64);
        }
    }

    #[test]
    fn test_parallel_failure_fails_run() {
        let store = test_store();
        let matchers = compile_patterns("block", false).unwrap();
        let mut tasks = tasks();
        tasks[3].contig = "missing".to_string();

        let progress = TaskProgress::hidden(tasks.len() as u64);
        let result = TaskScheduler::new(2).run_parallel(&store, &tasks, &matchers, 15, &progress);
        assert!(result.is_err());
    }

    #[test]
    fn test_parallel_reports_earliest_failure() {
        let store = test_store();
        let matchers = compile_patterns("block", false).unwrap();
        let mut tasks = tasks();
        tasks[1].contig = "missing_a".to_string();
        tasks[4].contig = "missing_b".to_string();

        for _ in 0..8 {
            let progress = TaskProgress::hidden(tasks.len() as u64);
            let result = TaskScheduler::new(4).run_parallel(&store, &tasks, &matchers, 15, &progress);
            match result {
                Err(ScanError::Sequence(SequenceError::NotFound(contig))) => assert_eq!(contig, "missing_a"),
                other => panic!("unexpected result: {:?}", other.map(|c| c.len())),
            }
            assert_eq!(progress.position(), tasks.len() as u64);
        }
    }

    #[test]
    fn test_zero_workers_clamped() {
        assert_eq!(TaskScheduler::new(0).workers(), 1);
    }
}
