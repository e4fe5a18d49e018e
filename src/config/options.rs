// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Only crawl the first N discovered countries. `None` = all.
    pub max_countries: Option<usize>,
    /// Pick up from `data_dir/checkpoint.json` if present.
    pub resume: bool,
    /// Skip the detail-page pass for terminated treaties.
    pub skip_enrichment: bool,
    /// Checkpoint, partial rows and the debug log live here.
    pub data_dir: PathBuf,
    pub net: NetOptions,
    pub pacing: Pacing,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_countries: None,
            resume: false,
            skip_enrichment: false,
            data_dir: PathBuf::from(DATA_DIR),
            net: NetOptions::default(),
            pacing: Pacing::default(),
        }
    }
}

impl ScrapeOptions {
    pub fn checkpoint_path(&self) -> PathBuf {
        self.data_dir.join(CHECKPOINT_FILE)
    }

    pub fn partial_path(&self) -> PathBuf {
        self.data_dir.join(PARTIAL_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub user_agent: String,
    pub page_timeout: Duration,
    /// How long to keep re-loading a page whose ready selector is missing.
    pub selector_timeout: Duration,
    pub settle_poll: Duration,
    /// Attempts per page, including the first one.
    pub max_retries: u32,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            user_agent: s!(USER_AGENT),
            page_timeout: Duration::from_millis(PAGE_TIMEOUT_MS),
            selector_timeout: Duration::from_millis(SELECTOR_TIMEOUT_MS),
            settle_poll: Duration::from_millis(SETTLE_POLL_MS),
            max_retries: MAX_RETRIES,
        }
    }
}

impl NetOptions {
    /// Number of extra loads a page may get while waiting for its content.
    /// Zero poll interval → no reloads.
    pub fn settle_polls(&self) -> u32 {
        self.selector_timeout
            .as_nanos()
            .checked_div(self.settle_poll.as_nanos())
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
    }
}

/// Sleeps between page loads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub country: Duration,
    pub detail: Duration,
    pub probe: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            country: Duration::from_millis(DELAY_COUNTRY_MS),
            detail: Duration::from_millis(DELAY_DETAIL_MS),
            probe: Duration::from_millis(DELAY_PROBE_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_path: PathBuf,
    pub format: ExportFormat,
    pub include_headers: bool,
    /// Also write `<out_path stem>.json`.
    pub write_json: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DATA_DIR).join(DEFAULT_OUT_FILE),
            format: ExportFormat::Csv,
            include_headers: true,
            write_json: true,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    pub fn json_path(&self) -> PathBuf {
        self.out_path.with_extension("json")
    }

    /// Switch format; a default-looking extension follows the format, a custom one is kept.
    pub fn set_format(&mut self, format: ExportFormat) {
        let ext = self.out_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext.is_empty() || ext == self.format.ext() {
            self.out_path.set_extension(format.ext());
        }
        self.format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_sidecar_sits_next_to_output() {
        let mut export = ExportOptions::default();
        export.out_path = PathBuf::from("out/bits.csv");
        assert_eq!(export.json_path(), PathBuf::from("out/bits.json"));
    }

    #[test]
    fn set_format_follows_default_extension_only() {
        let mut export = ExportOptions::default();
        export.out_path = PathBuf::from("out/bits.csv");
        export.set_format(ExportFormat::Tsv);
        assert_eq!(export.out_path(), Path::new("out/bits.tsv"));

        export.out_path = PathBuf::from("out/bits.data");
        export.set_format(ExportFormat::Csv);
        assert_eq!(export.out_path(), Path::new("out/bits.data"));
        assert_eq!(export.format, ExportFormat::Csv);
    }

    #[test]
    fn settle_polls_from_timeouts() {
        let net = NetOptions::default();
        assert_eq!(net.settle_polls(), 3);

        let net = NetOptions { settle_poll: Duration::ZERO, ..NetOptions::default() };
        assert_eq!(net.settle_polls(), 0);
    }

    #[test]
    fn settle_polls_below_a_millisecond() {
        let net = NetOptions {
            selector_timeout: Duration::from_millis(3),
            settle_poll: Duration::from_micros(500),
            ..NetOptions::default()
        };
        assert_eq!(net.settle_polls(), 6);

        let net = NetOptions {
            selector_timeout: Duration::from_secs(u64::MAX / 1_000),
            settle_poll: Duration::from_nanos(1),
            ..NetOptions::default()
        };
        assert_eq!(net.settle_polls(), u32::MAX);
    }
}
