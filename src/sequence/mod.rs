// Tue Jan 13 2026 - Alex

pub mod dna;
pub mod error;
pub mod fasta;
pub mod provider;
pub mod region;

pub use dna::{g_count, reverse_complement};
pub use error::SequenceError;
pub use fasta::{FaiEntry, FastaIndex, IndexedFasta};
pub use provider::{InMemorySequences, SequenceProvider};
pub use region::{resolve_regions, Region, RegionSpec};
