// src/scrape/treaties.rs
use super::Session;
use crate::config::consts::{CHECKPOINT_EVERY, COUNTRY_TABLE_READY};
use crate::data::{Country, RawTreaty};
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::specs::treaties::{has_table, looks_rendered, parse_country_page};
use crate::store::{ResumeState, save_checkpoint};

/// Stage 2+3 for one country: load the rendered page, read the table.
/// A rendered page without a treaty table yields no rows. A page that never
/// rendered is an error, so the country stays pending for `--resume`.
pub fn scrape_country(s: &mut Session, country: &Country) -> Result<Vec<RawTreaty>> {
    let url = country.url();
    let page = s.source.load(&url, Some(COUNTRY_TABLE_READY))?;
    if !page.is_ok() {
        return Err(Error::Status { url, status: page.status });
    }
    if !has_table(&page.html) {
        if !looks_rendered(&page.html) {
            return Err(Error::Unrendered { url });
        }
        logw!("No treaty table found for {} (id={})", country.name, country.id);
        return Ok(Vec::new());
    }

    let rows = parse_country_page(&page.html, country);
    logf!("  {} (id={}): {} treaties", country.name, country.id, rows.len());
    Ok(rows)
}

/// Result of the country pass.
#[derive(Debug, Default)]
pub struct Collected {
    /// Raw rows, resumed ones first, in crawl order.
    pub treaties: Vec<RawTreaty>,
    /// Countries that failed this run; not in `done`, so `--resume` retries them.
    pub failed: Vec<u32>,
}

/// Walk every country page in order, checkpointing as we go.
///
/// A failing country is logged and skipped; the rest of the crawl continues.
/// Only checkpoint write failures abort.
pub fn collect_treaties(
    s: &mut Session,
    countries: &[Country],
    resume: ResumeState,
    progress: &mut dyn Progress,
) -> Result<Collected> {
    let ResumeState { mut done, mut treaties } = resume;
    let mut failed = Vec::new();

    let pending = countries.iter().filter(|c| !done.contains(&c.id)).count();
    progress.begin("Country pages", pending);

    for (i, country) in countries.iter().enumerate() {
        if done.contains(&country.id) {
            logf!("Skipping {} (id={}) – already done", country.name, country.id);
            continue;
        }
        // Also separates the first country page from the seed page.
        s.pacer.pause(s.opts.pacing.country);

        logd!("[{}/{}] Scraping {} …", i + 1, countries.len(), country.name);
        match scrape_country(s, country) {
            Ok(mut rows) => {
                treaties.append(&mut rows);
                done.insert(country.id);
                progress.item_done(&country.name);
                if done.len() % CHECKPOINT_EVERY == 0 {
                    save_checkpoint(&s.opts.data_dir, &done, &treaties)?;
                }
            }
            Err(e) => {
                loge!("Failed on {} (id={}): {e}", country.name, country.id);
                failed.push(country.id);
                progress.item_failed(&country.name, &e.to_string());
            }
        }
    }

    save_checkpoint(&s.opts.data_dir, &done, &treaties)?;
    progress.finish();
    Ok(Collected { treaties, failed })
}
