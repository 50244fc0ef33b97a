// Tue Jan 13 2026 - Alex

use crate::pattern::ScanMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid region: {0}")]
    Region(String),
    #[error("Invalid option: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub fasta: PathBuf,
    pub fasta_index: Option<PathBuf>,
    pub output_file: PathBuf,
    /// Empty means every contig in the index.
    pub regions: Vec<String>,
    pub scan_mode: ScanMode,
    pub allow_noncanonical: bool,
    pub allow_n: bool,
    pub max_g_content: usize,
    pub cores: usize,
    pub check_uniqueness: bool,
    pub only_unique: bool,
    pub unbuffered: bool,
    pub progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fasta: PathBuf::new(),
            fasta_index: None,
            output_file: PathBuf::from("gRNAs.csv"),
            regions: Vec::new(),
            scan_mode: ScanMode::Exhaustive,
            allow_noncanonical: false,
            allow_n: false,
            max_g_content: 15,
            cores: 1,
            check_uniqueness: true,
            only_unique: false,
            unbuffered: false,
            progress: true,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fasta(mut self, fasta: PathBuf) -> Self {
        self.fasta = fasta;
        self
    }

    pub fn with_output_file(mut self, output: PathBuf) -> Self {
        self.output_file = output;
        self
    }

    pub fn with_regions(mut self, regions: Vec<String>) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    pub fn with_noncanonical(mut self, allow: bool) -> Self {
        self.allow_noncanonical = allow;
        self
    }

    pub fn with_allow_n(mut self, allow: bool) -> Self {
        self.allow_n = allow;
        self
    }

    pub fn with_max_g_content(mut self, max: usize) -> Self {
        self.max_g_content = max;
        self
    }

    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    pub fn with_uniqueness(mut self, check: bool) -> Self {
        self.check_uniqueness = check;
        self
    }

    pub fn with_only_unique(mut self, only: bool) -> Self {
        self.only_unique = only;
        self
    }

    pub fn with_unbuffered(mut self, unbuffered: bool) -> Self {
        self.unbuffered = unbuffered;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Resolves conflicting options: unbuffered scans run on one worker without
    /// uniqueness, and only-unique requires uniqueness.
    pub fn normalize(mut self) -> Self {
        if self.unbuffered {
            self.cores = 1;
            self.check_uniqueness = false;
            self.only_unique = false;
            self.progress = false;
        } else if !self.check_uniqueness {
            self.only_unique = false;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cores == 0 {
            return Err(ConfigError::Invalid("cores must be at least 1".to_string()));
        }
        if self.only_unique && !self.check_uniqueness {
            return Err(ConfigError::Invalid(
                "only-unique filtering requires uniqueness checking".to_string(),
            ));
        }
        if self.unbuffered && (self.cores != 1 || self.check_uniqueness) {
            return Err(ConfigError::Invalid(
                "unbuffered scans run on one core without uniqueness checking".to_string(),
            ));
        }
        Ok(())
    }

    pub fn index_path(&self) -> PathBuf {
        self.fasta_index
            .clone()
            .unwrap_or_else(|| crate::sequence::FastaIndex::default_path(&self.fasta))
    }

    /// Option block logged at the start of a run.
    pub fn describe(&self) -> String {
        let mut options = format!(
            "{} v{}\n\nOptions\n=======\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        options += &format!("FASTA: {}\n", self.fasta.display());
        options += &format!("Output file: {}\n", self.output_file.display());
        options += &format!(
            "Target: {}\n",
            if self.regions.is_empty() {
                "All contigs".to_string()
            } else {
                self.regions.join(", ")
            }
        );
        options += &format!("Allow non-canonical starts?: {}\n", self.allow_noncanonical);
        options += &format!("Allow N bases?: {}\n", self.allow_n);
        options += &format!("Max G-bases per site: {}\n", self.max_g_content);
        options += &format!(
            "Scan type: {}\n",
            match self.scan_mode {
                ScanMode::Block => "Block",
                ScanMode::Exhaustive => "Exhaustive",
            }
        );
        options += &format!("Buffered scan: {}\n", yes_no(!self.unbuffered));
        options += &format!("Test site uniqueness: {}\n", yes_no(self.check_uniqueness));
        options += &format!("Only unique sites: {}\n", yes_no(self.only_unique));
        options += &format!("Processes: {}\n", self.cores);
        options
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
