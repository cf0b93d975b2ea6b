//! Terminal progress bar for clip batches

use std::io::IsTerminal;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ports::*;
use crate::utils::logging::LogFormat;

const BAR_TEMPLATE: &str =
    "{prefix:.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} {msg}";

/// Progress bar on stderr, one tick per clip
pub struct IndicatifProgress {
    visible: bool,
    bar: Mutex<ProgressBar>,
}

impl IndicatifProgress {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            bar: Mutex::new(ProgressBar::hidden()),
        }
    }

    /// Tracks counts without drawing anything
    pub fn hidden() -> Self {
        Self::new(false)
    }

    /// Drawn only for text logs on an interactive stderr
    pub fn for_stderr(format: LogFormat) -> Self {
        Self::new(format != LogFormat::Json && std::io::stderr().is_terminal())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Items completed in the current batch
    pub fn position(&self) -> u64 {
        self.current().position()
    }

    fn current(&self) -> ProgressBar {
        match self.bar.lock() {
            Ok(bar) => bar.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressPort for IndicatifProgress {
    fn start(&self, label: &str, total: u64) {
        let bar = if self.visible {
            ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr())
        } else {
            ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden())
        };
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(label.to_string());

        match self.bar.lock() {
            Ok(mut current) => *current = bar,
            Err(poisoned) => *poisoned.into_inner() = bar,
        }
    }

    fn advance(&self, message: &str) {
        let bar = self.current();
        bar.set_message(message.to_string());
        bar.inc(1);
    }

    fn finish(&self) {
        self.current().finish();
    }
}
