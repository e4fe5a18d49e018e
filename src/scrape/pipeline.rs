// src/scrape/pipeline.rs
use std::path::PathBuf;

use super::{Session, collect_treaties, discover_countries, enrich_terminations};
use crate::config::options::AppOptions;
use crate::core::{Pacer, PageSource};
use crate::data::Treaty;
use crate::dedupe::deduplicate;
use crate::error::Result;
use crate::file;
use crate::normalize::normalize;
use crate::progress::Progress;
use crate::store::{self, ResumeState};

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub countries: usize,
    pub raw_rows: usize,
    pub unique: usize,
    pub terminated: usize,
    pub enriched: usize,
    pub failed_countries: Vec<u32>,
    pub files_written: Vec<PathBuf>,
    /// The exported records, in export order.
    pub treaties: Vec<Treaty>,
}

/// Discover → crawl → dedupe → normalize → enrich → export.
///
/// The checkpoint is removed after a clean export. If any country failed it
/// stays, so `--resume` picks up exactly the missing pages.
pub fn run(
    opts: &AppOptions,
    source: &mut dyn PageSource,
    pacer: &mut dyn Pacer,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    let scrape = &opts.scrape;
    let mut s = Session { source, pacer, opts: scrape };

    let resume = if scrape.resume {
        store::load_checkpoint(&scrape.data_dir)?
    } else {
        ResumeState::default()
    };

    let mut countries = discover_countries(&mut s)?;
    logf!("Total countries discovered: {}", countries.len());
    if let Some(n) = scrape.max_countries {
        countries.truncate(n);
        logf!("Limited to first {n} countries");
    }

    let collected = collect_treaties(&mut s, &countries, resume, progress)?;
    let raw_rows = collected.treaties.len();
    let unique = deduplicate(collected.treaties);
    logf!("De-duplicated: {raw_rows} raw → {} unique treaties", unique.len());

    let mut treaties: Vec<Treaty> = unique.into_iter().map(normalize).collect();
    let terminated = treaties.iter().filter(|t| t.is_terminated()).count();

    let enriched = if scrape.skip_enrichment {
        logf!("Skipping termination types for {terminated} terminated treaties");
        0
    } else {
        enrich_terminations(&mut s, &mut treaties, progress)
    };

    let files_written = file::export(&treaties, &opts.export)?;

    if collected.failed.is_empty() {
        store::clear_checkpoint(&scrape.data_dir)?;
    } else {
        logw!(
            "{} countries failed ({:?}); checkpoint kept, rerun with --resume to retry them",
            collected.failed.len(),
            collected.failed
        );
    }

    logf!("Done.");
    Ok(RunSummary {
        countries: countries.len(),
        raw_rows,
        unique: treaties.len(),
        terminated,
        enriched,
        failed_countries: collected.failed,
        files_written,
        treaties,
    })
}
