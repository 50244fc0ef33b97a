// Wed Jan 15 2026 - Alex

use indicatif::{ProgressBar as IndicatifBar, ProgressDrawTarget, ProgressStyle};

const TASK_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Counts finished region tasks. Safe to share across workers.
pub struct TaskProgress {
    bar: IndicatifBar,
}

impl TaskProgress {
    pub fn new(total: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template(TASK_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ ");

        let bar = IndicatifBar::new(total);
        bar.set_style(style);
        bar.set_message("regions");

        Self { bar }
    }

    pub fn hidden(total: u64) -> Self {
        let bar = IndicatifBar::with_draw_target(Some(total), ProgressDrawTarget::hidden());
        Self { bar }
    }

    pub fn for_run(total: u64, visible: bool) -> Self {
        if visible {
            Self::new(total)
        } else {
            Self::hidden(total)
        }
    }

    pub fn increment(&self) {
        self.bar.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
