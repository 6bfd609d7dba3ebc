//! Progress reporting for provider execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use insight_application::ExecutionProgress;
use insight_domain::ProviderId;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports progress with one spinner per running provider
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<ProviderId, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionProgress for ProgressReporter {
    fn on_provider_start(&self, task_id: &str, provider: ProviderId) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(provider.to_string());
        pb.set_message(format!("running {}...", task_id));
        pb.enable_steady_tick(Duration::from_millis(100));

        self.bars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(provider, pb);
    }

    fn on_provider_complete(&self, _task_id: &str, provider: ProviderId, success: bool) {
        let bar = self
            .bars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&provider);
        if let Some(pb) = bar {
            let status = if success {
                format!("{} done", "v".green())
            } else {
                format!("{} failed", "x".red())
            };
            pb.finish_with_message(status);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ExecutionProgress for SimpleProgress {
    fn on_provider_start(&self, task_id: &str, provider: ProviderId) {
        eprintln!("{} {} on {}", "->".cyan(), task_id.bold(), provider);
    }

    fn on_provider_complete(&self, _task_id: &str, provider: ProviderId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider);
        }
    }
}
