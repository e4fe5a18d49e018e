// tests/common/mod.rs
#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use iia_scrape::config::consts::{BASE_URL, COUNTRY_URL};
use iia_scrape::config::options::AppOptions;
use iia_scrape::core::{MemorySource, Pacer};

pub const AFGHANISTAN: &str = include_str!("../fixtures/country_afghanistan.html");
pub const GERMANY: &str = include_str!("../fixtures/country_germany.html");
pub const EMPTY_COUNTRY: &str = include_str!("../fixtures/country_empty.html");
pub const TREATY_7: &str = include_str!("../fixtures/treaty_7.html");
pub const TREATY_9: &str = include_str!("../fixtures/treaty_9.html");

pub const T5: &str = "/international-investment-agreements/treaties/bit/5/afghanistan---germany-bit-2005-";
pub const T7: &str = "/international-investment-agreements/treaties/bit/7/afghanistan---iran-bit-2006-";
pub const T9: &str = "/international-investment-agreements/treaties/bit/9/albania---germany-bit-1991-";

pub fn seed_url() -> String {
    format!("{COUNTRY_URL}/1/afghanistan")
}

pub fn country_url(id: u32, slug: &str) -> String {
    format!("{COUNTRY_URL}/{id}/{slug}")
}

pub fn detail_url(href: &str) -> String {
    format!("{BASE_URL}{href}")
}

/// The seed page is Afghanistan's own page; its selector lists
/// Afghanistan, Germany, Albania in that order.
pub fn site() -> MemorySource {
    MemorySource::new()
        .with_page(&seed_url(), AFGHANISTAN)
        .with_page(&country_url(78, "germany"), GERMANY)
        .with_page(&country_url(2, "albania"), EMPTY_COUNTRY)
        .with_page(&detail_url(T7), TREATY_7)
        .with_page(&detail_url(T9), TREATY_9)
}

/// Options writing everything under `dir`.
pub fn options_in(dir: &Path) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.data_dir = dir.join("data");
    opts.export.out_path = dir.join("out").join("treaties.csv");
    opts
}

/// Remembers every requested pause instead of sleeping.
#[derive(Default)]
pub struct RecordingPacer {
    pub pauses: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.pauses.push(delay);
    }
}
