// Wed Jan 15 2026 - Alex

use crate::config::ScanConfig;
use crate::pattern::ScanMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ngg2")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Finds Cas9 NGG gRNA sites on both strands of a FASTA file", long_about = None)]
pub struct Args {
    /// FASTA file to scan
    pub fasta: PathBuf,

    #[arg(short, long, default_value = "gRNAs.csv")]
    pub output_file: PathBuf,

    /// `contig` or `contig:start-end` (1-based, inclusive); repeat for several
    #[arg(short, long = "region")]
    pub regions: Vec<String>,

    /// Accept guides that do not start with G
    #[arg(long)]
    pub allow_noncanonical: bool,

    /// Let wildcard positions match N
    #[arg(long)]
    pub allow_n: bool,

    /// Non-overlapping scan instead of every offset
    #[arg(long)]
    pub block_scan: bool,

    #[arg(long)]
    pub skip_unique_scan: bool,

    /// Write sites as each region finishes (one core, no uniqueness)
    #[arg(long)]
    pub unbuffered: bool,

    #[arg(long)]
    pub only_unique: bool,

    #[arg(long, default_value = "15")]
    pub max_site_gs: usize,

    #[arg(short, long, default_value = "1")]
    pub cores: usize,

    #[arg(long)]
    pub fasta_index: Option<PathBuf>,

    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[arg(short, long)]
    pub quiet: bool,

    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    pub fn into_config(self) -> ScanConfig {
        let mut config = ScanConfig::new()
            .with_fasta(self.fasta)
            .with_output_file(self.output_file)
            .with_regions(self.regions)
            .with_scan_mode(if self.block_scan { ScanMode::Block } else { ScanMode::Exhaustive })
            .with_noncanonical(self.allow_noncanonical)
            .with_allow_n(self.allow_n)
            .with_max_g_content(self.max_site_gs)
            .with_cores(self.cores)
            .with_uniqueness(!self.skip_unique_scan)
            .with_only_unique(self.only_unique)
            .with_unbuffered(self.unbuffered)
            .with_progress(!(self.no_progress || self.quiet));
        config.fasta_index = self.fasta_index;
        config.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Args::parse_from(["ngg2", "genome.fa"]).into_config();
        assert_eq!(config.fasta, PathBuf::from("genome.fa"));
        assert_eq!(config.output_file, PathBuf::from("gRNAs.csv"));
        assert_eq!(config.scan_mode, ScanMode::Exhaustive);
        assert!(config.check_uniqueness);
        assert!(config.progress);
        assert!(config.regions.is_empty());
    }

    #[test]
    fn test_flags() {
        let config = Args::parse_from([
            "ngg2",
            "genome.fa",
            "--region",
            "chr1:1-1,000",
            "-r",
            "chrM",
            "--block-scan",
            "--allow-noncanonical",
            "--max-site-gs",
            "12",
            "--cores",
            "4",
            "--only-unique",
            "--quiet",
        ])
        .into_config();

        assert_eq!(config.regions, vec!["chr1:1-1,000", "chrM"]);
        assert_eq!(config.scan_mode, ScanMode::Block);
        assert!(config.allow_noncanonical);
        assert_eq!(config.max_g_content, 12);
        assert_eq!(config.cores, 4);
        assert!(config.only_unique);
        assert!(!config.progress);
    }

    #[test]
    fn test_unbuffered_normalized() {
        let config = Args::parse_from(["ngg2", "genome.fa", "--unbuffered", "--cores", "8"]).into_config();
        assert_eq!(config.cores, 1);
        assert!(!config.check_uniqueness);
    }
}
