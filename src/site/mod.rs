// Wed Jan 15 2026 - Alex

pub mod extractor;
pub mod guide;

pub use extractor::{extract, SiteExtractor, Sites};
pub use guide::{GuideSite, Strand};
