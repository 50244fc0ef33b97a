// Wed Jan 15 2026 - Alex

pub mod bar;

pub use bar::TaskProgress;
