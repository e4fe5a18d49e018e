// src/config/consts.rs
use std::ops::RangeInclusive;

// Site
pub const BASE_URL: &str = "https://investmentpolicy.unctad.org";
pub const COUNTRY_URL: &str =
    "https://investmentpolicy.unctad.org/international-investment-agreements/countries";
pub const SEED_PATH: &str = "/1/afghanistan";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Page readiness
pub const COUNTRY_TABLE_READY: &str = "table tbody tr";

// Net
pub const PAGE_TIMEOUT_MS: u64 = 60_000;
pub const SELECTOR_TIMEOUT_MS: u64 = 30_000;
pub const SETTLE_POLL_MS: u64 = 10_000;
pub const MAX_RETRIES: u32 = 3;

// Politeness
pub const DELAY_COUNTRY_MS: u64 = 1_000;
pub const DELAY_DETAIL_MS: u64 = 500;
pub const DELAY_PROBE_MS: u64 = 300;

// Discovery fallback: country ids probed one by one
pub const PROBE_IDS: RangeInclusive<u32> = 1..=250;

// Local data
pub const DATA_DIR: &str = "data";
pub const CHECKPOINT_FILE: &str = "checkpoint.json";
pub const PARTIAL_FILE: &str = "treaties_partial.csv";
pub const LOG_FILE: &str = "debug.log";
pub const CHECKPOINT_EVERY: usize = 10;

// Export
pub const DEFAULT_OUT_FILE: &str = "treaties.csv";
pub const CONFIG_FILE: &str = "iia_scrape.toml";
