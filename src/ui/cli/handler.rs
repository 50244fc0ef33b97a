// Wed Jan 15 2026 - Alex

use super::args::Args;
use crate::config::ScanConfig;
use crate::orchestration::{ScanCoordinator, ScanSummary};
use crate::sequence::IndexedFasta;
use crate::utils::{init_logger, level_from_str};
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Serialize)]
struct SummaryReport<'a> {
    config: &'a ScanConfig,
    summary: &'a ScanSummary,
    unique_percent: Option<f64>,
}

pub struct ScanHandler;

impl ScanHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<ScanSummary> {
        init_logger(level_from_str(&args.log_level), args.quiet);

        let summary_path = args.summary_json.clone();
        let config = args.into_config();
        config.validate()?;
        log::info!("{}", config.describe());

        let available = num_cpus::get();
        if config.cores > available {
            log::warn!("{} cores requested but only {} are available", config.cores, available);
        }

        let provider = IndexedFasta::open_with_index(&config.fasta, &config.index_path())
            .with_context(|| format!("Failed to open FASTA '{}'", config.fasta.display()))?;

        let output_file = config.output_file.clone();
        let mut coordinator = ScanCoordinator::new(config)?;
        let summary = coordinator
            .run(&provider, || File::create(&output_file))
            .with_context(|| format!("Scan failed, '{}' not completed", output_file.display()))?;

        log_totals(&summary);

        if let Some(path) = summary_path {
            save_summary(coordinator.config(), &summary, &path)
                .with_context(|| format!("Failed to write summary '{}'", path.display()))?;
        }

        Ok(summary)
    }
}

impl Default for ScanHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn log_totals(summary: &ScanSummary) {
    log::info!("{} total sites found by {} scanning", summary.site_count, summary.scan_mode);
    if let (Some(unique), Some(percent)) = (summary.unique_count, summary.unique_percent()) {
        log::info!("{} unique sites ({:.1}%)", unique, percent);
    }
}

fn save_summary(config: &ScanConfig, summary: &ScanSummary, path: &Path) -> anyhow::Result<()> {
    let report = SummaryReport {
        config,
        summary,
        unique_percent: summary.unique_percent(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::write_test_fasta;
    use clap::Parser;
    use std::ffi::OsString;

    #[test]
    fn test_execute_writes_table_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_test_fasta(dir.path());
        let output = dir.path().join("sites.csv");
        let summary_json = dir.path().join("summary.json");

        let argv: Vec<OsString> = vec![
            "ngg2".into(),
            fasta.into_os_string(),
            "--output-file".into(),
            output.clone().into_os_string(),
            "--summary-json".into(),
            summary_json.clone().into_os_string(),
            "--cores".into(),
            "2".into(),
            "--quiet".into(),
        ];
        let summary = ScanHandler::new().execute(Args::parse_from(argv)).unwrap();
        assert_eq!(summary.site_count, 2);

        let table = std::fs::read_to_string(&output).unwrap();
        assert_eq!(table.lines().count(), 3);
        assert!(dir.path().join("test.fa.fai").exists());

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&summary_json).unwrap()).unwrap();
        assert_eq!(report["summary"]["site_count"], 2);
        assert_eq!(report["summary"]["scan_mode"], "exhaustive");
        assert_eq!(report["config"]["cores"], 2);
    }

    #[test]
    fn test_missing_fasta_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let argv: Vec<OsString> = vec![
            "ngg2".into(),
            dir.path().join("absent.fa").into_os_string(),
            "--quiet".into(),
        ];
        assert!(ScanHandler::new().execute(Args::parse_from(argv)).is_err());
    }

    #[test]
    fn test_invalid_config_leaves_no_index() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_test_fasta(dir.path());
        let argv: Vec<OsString> = vec![
            "ngg2".into(),
            fasta.into_os_string(),
            "--output-file".into(),
            dir.path().join("sites.csv").into_os_string(),
            "--cores".into(),
            "0".into(),
            "--quiet".into(),
        ];

        let err = ScanHandler::new().execute(Args::parse_from(argv)).unwrap_err();
        assert!(err.to_string().contains("cores"));
        assert!(!dir.path().join("test.fa.fai").exists());
        assert!(!dir.path().join("sites.csv").exists());
    }
}
