// Tue Jan 13 2026 - Alex

use crate::config::ScanConfig;
use crate::orchestration::{
    CollectedResults, RecordWriter, RegionTask, ScanError, TaskScheduler, UniquenessTable,
};
use crate::pattern::{MatcherPair, PatternCompiler, ScanMode};
use crate::sequence::{resolve_regions, SequenceProvider};
use crate::ui::progress::TaskProgress;
use crate::utils::logging::ScopedTimer;
use ahash::AHashSet;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configuring,
    Dispatching,
    Collecting,
    Aggregating,
    Emitting,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuring => "configuring",
            Self::Dispatching => "dispatching",
            Self::Collecting => "collecting",
            Self::Aggregating => "aggregating",
            Self::Emitting => "emitting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Totals for one finished scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummary {
    pub scan_mode: ScanMode,
    pub regions: usize,
    pub tasks: usize,
    /// Rows written to the output.
    pub site_count: usize,
    /// Rows marked unique, when uniqueness was checked.
    pub unique_count: Option<usize>,
}

impl ScanSummary {
    pub fn unique_percent(&self) -> Option<f64> {
        match self.unique_count {
            Some(unique) if self.site_count > 0 => Some(unique as f64 / self.site_count as f64 * 100.0),
            _ => None,
        }
    }
}

/// Drives a whole scan: resolve regions, run the strand tasks, count guide
/// occurrences and write the table in input order.
pub struct ScanCoordinator {
    config: ScanConfig,
    matchers: MatcherPair,
    phase: Phase,
}

impl ScanCoordinator {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let config = config.normalize();
        config.validate()?;

        let matchers = PatternCompiler::new()
            .allow_noncanonical(config.allow_noncanonical)
            .allow_n(config.allow_n)
            .compile(config.scan_mode)?;

        Ok(Self {
            config,
            matchers,
            phase: Phase::Configuring,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!("Scan phase: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Strand tasks for every configured region, `+` before `-`, in input order.
    pub fn plan(&self, provider: &dyn SequenceProvider) -> Result<Vec<RegionTask>, ScanError> {
        let regions = resolve_regions(&self.config.regions, provider)?;
        Ok(RegionTask::expand(&regions))
    }

    /// Runs the scan. `open_output` is only called once there is something to
    /// write, so a failed buffered scan leaves no output behind.
    pub fn run<W, F>(&mut self, provider: &dyn SequenceProvider, open_output: F) -> Result<ScanSummary, ScanError>
    where
        W: Write,
        F: FnOnce() -> io::Result<W>,
    {
        let _timer = ScopedTimer::new("scan");
        let tasks = self.plan(provider)?;

        let summary = if self.config.unbuffered {
            self.run_streaming(provider, &tasks, open_output)?
        } else {
            self.run_buffered(provider, &tasks, open_output)?
        };

        self.enter(Phase::Done);
        Ok(summary)
    }

    fn summary(&self, tasks: &[RegionTask], site_count: usize, unique_count: Option<usize>) -> ScanSummary {
        ScanSummary {
            scan_mode: self.config.scan_mode,
            regions: tasks.len() / 2,
            tasks: tasks.len(),
            site_count,
            unique_count,
        }
    }

    fn run_streaming<W, F>(
        &mut self,
        provider: &dyn SequenceProvider,
        tasks: &[RegionTask],
        open_output: F,
    ) -> Result<ScanSummary, ScanError>
    where
        W: Write,
        F: FnOnce() -> io::Result<W>,
    {
        self.enter(Phase::Emitting);
        let mut writer = RecordWriter::new(open_output()?, false);
        writer.write_header()?;

        TaskScheduler::new(1).run_sequential(
            provider,
            tasks,
            &self.matchers,
            self.config.max_g_content,
            |result| {
                for site in &result.sites {
                    writer.write_site(site, None)?;
                }
                writer.flush()?;
                Ok(())
            },
        )?;

        let site_count = writer.written();
        writer.finish()?;
        Ok(self.summary(tasks, site_count, None))
    }

    fn run_buffered<W, F>(
        &mut self,
        provider: &dyn SequenceProvider,
        tasks: &[RegionTask],
        open_output: F,
    ) -> Result<ScanSummary, ScanError>
    where
        W: Write,
        F: FnOnce() -> io::Result<W>,
    {
        self.enter(Phase::Dispatching);
        let mut seen = AHashSet::with_capacity(tasks.len());
        let distinct: Vec<RegionTask> = tasks.iter().filter(|t| seen.insert(*t)).cloned().collect();
        if distinct.len() < tasks.len() {
            log::warn!(
                "{} duplicated region tasks will be scanned once and reported each time",
                tasks.len() - distinct.len()
            );
        }

        self.enter(Phase::Collecting);
        let progress = TaskProgress::for_run(distinct.len() as u64, self.config.progress);
        let collected = TaskScheduler::new(self.config.cores).run_parallel(
            provider,
            &distinct,
            &self.matchers,
            self.config.max_g_content,
            &progress,
        );
        let collected = match collected {
            Ok(collected) => {
                progress.finish();
                collected
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };

        let table = if self.config.check_uniqueness {
            self.enter(Phase::Aggregating);
            let mut table = UniquenessTable::new();
            for task in tasks {
                table.extend(results_for(&collected, task)?);
            }
            log::debug!("{} distinct guide sequences across {} sites", table.distinct(), table.total());
            Some(table)
        } else {
            None
        };

        self.enter(Phase::Emitting);
        let mut writer = RecordWriter::new(open_output()?, table.is_some());
        writer.write_header()?;

        let mut unique_count = 0;
        for task in tasks {
            for site in results_for(&collected, task)? {
                let unique = table.as_ref().map(|t| t.is_unique(&site.seq));
                if self.config.only_unique && unique == Some(false) {
                    continue;
                }
                if unique == Some(true) {
                    unique_count += 1;
                }
                writer.write_site(site, unique)?;
            }
        }

        let site_count = writer.written();
        writer.finish()?;
        Ok(self.summary(tasks, site_count, table.map(|_| unique_count)))
    }
}

fn results_for<'c>(collected: &'c CollectedResults, task: &RegionTask) -> Result<&'c [crate::site::GuideSite], ScanError> {
    collected
        .get(task)
        .map(Vec::as_slice)
        .ok_or_else(|| ScanError::MissingResult(task.to_string()))
}
