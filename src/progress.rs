// src/progress.rs
/// Lightweight progress reporting for the long-running stages.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start of a stage with the number of items.
    fn begin(&mut self, _stage: &str, _total: usize) {}

    /// One item (country page, detail page) finished.
    fn item_done(&mut self, _label: &str) {}

    /// One item failed; the run carries on.
    fn item_failed(&mut self, _label: &str, _err: &str) {}

    /// Called at the end of the stage, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Writes progress through the log macros: `[i/N] label …`.
#[derive(Default)]
pub struct LogProgress {
    stage: String,
    total: usize,
    done: usize,
    failed: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, stage: &str, total: usize) {
        self.stage = s!(stage);
        self.total = total;
        self.done = 0;
        self.failed = 0;
        logf!("{stage}: {total} to go");
    }

    fn item_done(&mut self, label: &str) {
        self.done += 1;
        logf!("  [{}/{}] {label}", self.done + self.failed, self.total);
    }

    fn item_failed(&mut self, label: &str, err: &str) {
        self.failed += 1;
        loge!("  [{}/{}] {label} failed: {err}", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        if self.failed > 0 {
            logw!("{}: {} done, {} failed", self.stage, self.done, self.failed);
        } else {
            logf!("{}: {} done", self.stage, self.done);
        }
    }
}
