// src/scrape/mod.rs
//! Crawl orchestration: which page to load when, how long to wait, what to
//! do when a load fails. Page parsing lives in `specs`.

mod countries;
mod enrich;
mod pipeline;
mod treaties;

pub use countries::{discover_countries, probe_ids};
pub use enrich::enrich_terminations;
pub use pipeline::{RunSummary, run};
pub use treaties::{Collected, collect_treaties, scrape_country};

use crate::config::options::ScrapeOptions;
use crate::core::{Pacer, PageSource};

/// Everything a crawl step needs: where pages come from, how to wait, the knobs.
pub struct Session<'a> {
    pub source: &'a mut dyn PageSource,
    pub pacer: &'a mut dyn Pacer,
    pub opts: &'a ScrapeOptions,
}
