// tests/discovery.rs
mod common;

use common::*;
use iia_scrape::Error;
use iia_scrape::config::consts::{COUNTRY_URL, PROBE_IDS};
use iia_scrape::config::options::AppOptions;
use iia_scrape::core::MemorySource;
use iia_scrape::scrape::{self, Session, discover_countries, probe_ids};

const LINKS_ONLY: &str = r#"<html><body><nav>
  <a href="/international-investment-agreements/countries/1/afghanistan">Afghanistan</a>
  <a href="/international-investment-agreements/countries/2/albania">Albania</a>
  <a href="/international-investment-agreements/countries/1/afghanistan">Afghanistan</a>
</nav></body></html>"#;

fn ids_and_slugs(src: &mut MemorySource, opts: &AppOptions) -> Result<Vec<(u32, String)>, Error> {
    let mut pacer = RecordingPacer::default();
    let mut s = Session { source: src, pacer: &mut pacer, opts: &opts.scrape };
    Ok(discover_countries(&mut s)?.into_iter().map(|c| (c.id, c.slug)).collect())
}

#[test]
fn seed_selector_wins() {
    let opts = AppOptions::default();
    let found = ids_and_slugs(&mut site(), &opts).unwrap();
    assert_eq!(
        found,
        [(1, "afghanistan".to_string()), (78, "germany".to_string()), (2, "albania".to_string())]
    );
}

#[test]
fn sidebar_links_when_there_is_no_selector() {
    let opts = AppOptions::default();
    let mut src = MemorySource::new().with_page(&seed_url(), LINKS_ONLY);
    let found = ids_and_slugs(&mut src, &opts).unwrap();
    assert_eq!(found, [(1, "afghanistan".to_string()), (2, "albania".to_string())]);
    assert_eq!(src.requests().len(), 1);
}

#[test]
fn probing_follows_redirects_to_canonical_pages() {
    let opts = AppOptions::default();
    let mut src = MemorySource::new()
        .with_page(&seed_url(), "<html><body>loading…</body></html>")
        .with_redirect(&format!("{COUNTRY_URL}/3/x"), &country_url(3, "algeria"), "<h1>Algeria</h1>")
        .with_redirect(&format!("{COUNTRY_URL}/78/x"), &country_url(78, "germany"), GERMANY)
        // Two ids landing on the same country count once.
        .with_redirect(&format!("{COUNTRY_URL}/79/x"), &country_url(78, "germany"), GERMANY)
        .with_failure(&format!("{COUNTRY_URL}/4/x"));

    let mut pacer = RecordingPacer::default();
    let mut s = Session { source: &mut src, pacer: &mut pacer, opts: &opts.scrape };
    let found = discover_countries(&mut s).unwrap();

    let names: Vec<(u32, &str)> = found.iter().map(|c| (c.id, c.name.as_str())).collect();
    assert_eq!(names, [(3, "Algeria"), (78, "Germany")]);

    let probes = PROBE_IDS.count();
    assert_eq!(src.requests().len(), 1 + probes);
    assert_eq!(pacer.pauses.len(), probes);
    assert!(pacer.pauses.iter().all(|d| *d == opts.scrape.pacing.probe));
}

#[test]
fn probe_range_is_a_parameter() {
    let opts = AppOptions::default();
    let mut src = MemorySource::new()
        .with_redirect(&format!("{COUNTRY_URL}/12/x"), &country_url(12, "bahrain"), "<h2>Bahrain</h2>");
    let mut pacer = RecordingPacer::default();
    let mut s = Session { source: &mut src, pacer: &mut pacer, opts: &opts.scrape };

    let found = probe_ids(&mut s, 10..=12);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].slug, "bahrain");
    assert_eq!(src.requests().len(), 3);
}

#[test]
fn nothing_found_is_an_error() {
    let opts = AppOptions::default();
    let mut src = MemorySource::new().with_page(&seed_url(), "<html><body></body></html>");
    assert!(matches!(ids_and_slugs(&mut src, &opts), Err(Error::NoTargets)));
}

#[test]
fn unreachable_seed_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());
    let mut src = MemorySource::new().with_failure(&seed_url());

    let err = scrape::run(&opts, &mut src, &mut RecordingPacer::default(), &mut iia_scrape::progress::NullProgress)
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 503, .. }));
    assert!(!opts.export.out_path.exists());
}
