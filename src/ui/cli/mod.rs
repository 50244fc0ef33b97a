// Wed Jan 15 2026 - Alex

pub mod args;
pub mod handler;

pub use args::Args;
pub use handler::ScanHandler;

use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}
