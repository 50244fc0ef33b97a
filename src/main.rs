// Tue Jan 13 2026 - Alex

use colored::Colorize;
use ngg2::ui::cli::{parse_args, ScanHandler};

fn main() {
    let args = parse_args();

    if let Err(e) = ScanHandler::new().execute(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
