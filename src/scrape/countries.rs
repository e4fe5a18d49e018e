// src/scrape/countries.rs
use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::Session;
use crate::config::consts::{COUNTRY_URL, PROBE_IDS, SEED_PATH};
use crate::data::Country;
use crate::error::{Error, Result};
use crate::specs::countries::{parse_country_links, parse_probe, parse_select_options};

/// Stage 1: the full list of country pages to crawl.
///
/// Seed page selector first, then its links, then probing every id.
/// Nothing found at all is an error; there is no point crawling zero pages.
pub fn discover_countries(s: &mut Session) -> Result<Vec<Country>> {
    logf!("Discovering country list …");
    let seed = join!(COUNTRY_URL, SEED_PATH);
    let page = s.source.load(&seed, None)?;

    let countries = parse_select_options(&page.html);
    if !countries.is_empty() {
        logf!("Strategy 1 (select/option) found {} countries", countries.len());
        return Ok(countries);
    }

    let countries = parse_country_links(&page.html);
    if !countries.is_empty() {
        logf!("Strategy 2 (sidebar links) found {} countries", countries.len());
        return Ok(countries);
    }

    logf!(
        "Falling back to brute-force country discovery (IDs {}–{}) …",
        PROBE_IDS.start(),
        PROBE_IDS.end()
    );
    let countries = probe_ids(s, PROBE_IDS);
    logf!("Brute-force discovery found {} countries", countries.len());

    if countries.is_empty() {
        return Err(Error::NoTargets);
    }
    Ok(countries)
}

/// Load `/countries/{id}/x` for each id and keep the ones that resolve.
/// Failed or missing probes are skipped.
pub fn probe_ids(s: &mut Session, ids: RangeInclusive<u32>) -> Vec<Country> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();

    for id in ids {
        s.pacer.pause(s.opts.pacing.probe);
        let url = format!("{COUNTRY_URL}/{id}/x");
        match s.source.load(&url, None) {
            Ok(page) if page.is_ok() => {
                let Some(country) = parse_probe(&page.final_url, &page.html) else { continue };
                if seen.insert(country.id) {
                    logf!("  found country id={}  {}", country.id, country.name);
                    found.push(country);
                }
            }
            Ok(page) => logd!("probe id={id}: HTTP {}", page.status),
            Err(e) => logd!("probe id={id}: {e}"),
        }
    }
    found
}
