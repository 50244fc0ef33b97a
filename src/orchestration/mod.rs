// Tue Jan 13 2026 - Alex

pub mod aggregator;
pub mod coordinator;
pub mod error;
pub mod finalizer;
pub mod scheduler;
pub mod task;

pub use aggregator::UniquenessTable;
pub use coordinator::{Phase, ScanCoordinator, ScanSummary};
pub use error::ScanError;
pub use finalizer::RecordWriter;
pub use scheduler::{CollectedResults, TaskScheduler};
pub use task::{RegionTask, ScanResult};
