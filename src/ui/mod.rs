// Wed Jan 15 2026 - Alex

pub mod cli;
pub mod progress;

pub use cli::{Args, ScanHandler};
pub use progress::TaskProgress;
