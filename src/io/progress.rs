//! Progress display for GA runs and archive steps

use crate::evolution::genetic::GenerationReport;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static RUN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// One progress bar per GA run or archive step
///
/// Each bar counts generations. Archive steps run several GA runs back to
/// back, so their bars span the whole schedule.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    /// Add a bar for a unit of work spanning `generations` generations
    ///
    /// Returns the bar's index for later updates.
    pub fn start(&mut self, label: &str, generations: usize) -> usize {
        let bar = ProgressBar::new(generations as u64);
        bar.set_style(RUN_STYLE.clone());
        bar.set_prefix(label.to_owned());
        self.bars.push(self.multi_progress.add(bar));
        self.bars.len() - 1
    }

    /// Report a finished generation
    ///
    /// `offset` counts the generations of earlier GA runs on the same bar.
    pub fn advance(&self, index: usize, offset: usize, report: &GenerationReport) {
        if let Some(bar) = self.bars.get(index) {
            bar.set_position((offset + report.generation) as u64);
            bar.set_message(format!(
                "best {:.1} floor {:.1} feasible {}",
                report.best, report.elite_floor, report.feasible
            ));
        }
    }

    /// Mark a bar as done with a closing message
    pub fn complete(&self, index: usize, message: String) {
        if let Some(bar) = self.bars.get(index) {
            bar.finish_with_message(message);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
