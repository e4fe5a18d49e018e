// src/config/file.rs
//! Optional `iia_scrape.toml`.
//!
//! Every key is optional; whatever is present overrides the built-in default.
//! CLI flags are applied afterwards by the caller.
//!
//! ```toml
//! [scrape]
//! max_countries = 20
//! delay_country_ms = 2000
//!
//! [export]
//! output = "out/bits.tsv"
//! format = "tsv"
//! json = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::CONFIG_FILE;
use super::options::{AppOptions, ExportFormat};
use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub scrape: ScrapeSection,
    pub export: ExportSection,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeSection {
    /// 0 means all.
    pub max_countries: Option<usize>,
    pub skip_enrichment: Option<bool>,
    pub data_dir: Option<PathBuf>,
    pub user_agent: Option<String>,
    pub max_retries: Option<u32>,
    pub page_timeout_ms: Option<u64>,
    pub selector_timeout_ms: Option<u64>,
    pub settle_poll_ms: Option<u64>,
    pub delay_country_ms: Option<u64>,
    pub delay_detail_ms: Option<u64>,
    pub delay_probe_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub output: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub include_headers: Option<bool>,
    pub json: Option<bool>,
}

impl ConfigFile {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Toml { path: path.to_path_buf(), source })
    }

    /// Load `explicit` if given (must exist), else `./iia_scrape.toml` if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>> {
        let path = match explicit {
            Some(p) => {
                if !p.is_file() {
                    return Err(Error::Config(format!("config file not found: {}", p.display())));
                }
                p.to_path_buf()
            }
            None => {
                let p = PathBuf::from(CONFIG_FILE);
                if !p.is_file() {
                    return Ok(None);
                }
                p
            }
        };
        let text = fs::read_to_string(&path)?;
        logd!("Config: loaded {}", path.display());
        Self::parse(&text, &path).map(Some)
    }

    pub fn apply(&self, opts: &mut AppOptions) {
        let s = &self.scrape;
        let scrape = &mut opts.scrape;

        if let Some(n) = s.max_countries {
            scrape.max_countries = (n > 0).then_some(n);
        }
        if let Some(v) = s.skip_enrichment { scrape.skip_enrichment = v; }
        if let Some(v) = &s.data_dir { scrape.data_dir = v.clone(); }
        if let Some(v) = &s.user_agent { scrape.net.user_agent = v.clone(); }
        if let Some(v) = s.max_retries { scrape.net.max_retries = v; }
        if let Some(v) = s.page_timeout_ms { scrape.net.page_timeout = Duration::from_millis(v); }
        if let Some(v) = s.selector_timeout_ms { scrape.net.selector_timeout = Duration::from_millis(v); }
        if let Some(v) = s.settle_poll_ms { scrape.net.settle_poll = Duration::from_millis(v); }
        if let Some(v) = s.delay_country_ms { scrape.pacing.country = Duration::from_millis(v); }
        if let Some(v) = s.delay_detail_ms { scrape.pacing.detail = Duration::from_millis(v); }
        if let Some(v) = s.delay_probe_ms { scrape.pacing.probe = Duration::from_millis(v); }

        let e = &self.export;
        let export = &mut opts.export;
        if let Some(v) = &e.output { export.out_path = v.clone(); }
        if let Some(v) = e.format { export.set_format(v); }
        if let Some(v) = e.include_headers { export.include_headers = v; }
        if let Some(v) = e.json { export.write_json = v; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let text = r#"
            [scrape]
            max_countries = 5
            delay_detail_ms = 1500

            [export]
            output = "out/bits.csv"
            format = "tsv"
        "#;
        let cfg = ConfigFile::parse(text, Path::new("test.toml")).unwrap();
        let mut opts = AppOptions::default();
        cfg.apply(&mut opts);

        assert_eq!(opts.scrape.max_countries, Some(5));
        assert_eq!(opts.scrape.pacing.detail, Duration::from_millis(1500));
        assert_eq!(opts.scrape.pacing.country, AppOptions::default().scrape.pacing.country);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.export.out_path, PathBuf::from("out/bits.tsv"));
        assert!(opts.export.write_json);
    }

    #[test]
    fn zero_max_countries_means_all() {
        let cfg = ConfigFile::parse("[scrape]\nmax_countries = 0\n", Path::new("t.toml")).unwrap();
        let mut opts = AppOptions::default();
        opts.scrape.max_countries = Some(3);
        cfg.apply(&mut opts);
        assert_eq!(opts.scrape.max_countries, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ConfigFile::parse("[scrape]\nthreads = 8\n", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err, Error::Toml { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ConfigFile::load(Some(Path::new("definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
