// src/specs/countries.rs
//! Crawl targets.
//!
//! Country pages live at `/countries/{id}/{slug}`. The seed page carries a
//! country `<select>` whose option values are those paths; older layouts only
//! have sidebar links. Failing both, the caller probes ids one by one and
//! reads the page it lands on.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::css;
use crate::core::sanitize::element_text;
use crate::data::Country;

static COUNTRY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/countries/(\d+)/([a-z0-9-]+)").expect("static pattern"));

static SELECT_OPTION: LazyLock<Selector> = LazyLock::new(|| css("select option"));
static COUNTRY_LINK: LazyLock<Selector> = LazyLock::new(|| css("a[href*='/countries/']"));
static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| css("h1, h2, .page-title"));

/// `(id, slug)` from anything containing `/countries/{id}/{slug}`.
pub fn parse_country_path(s: &str) -> Option<(u32, String)> {
    let caps = COUNTRY_PATH.captures(s)?;
    let id = caps[1].parse().ok()?;
    Some((id, s!(&caps[2])))
}

/// Strategy 1: `<select>` options.
pub fn parse_select_options(html: &str) -> Vec<Country> {
    let doc = Html::parse_document(html);
    let found = doc.select(&SELECT_OPTION).filter_map(|opt| {
        let value = opt.value().attr("value").unwrap_or("");
        let (id, slug) = parse_country_path(value)?;
        Some(Country { id, slug, name: element_text(&opt) })
    });
    first_per_id(found)
}

/// Strategy 2: any link into a country page.
pub fn parse_country_links(html: &str) -> Vec<Country> {
    let doc = Html::parse_document(html);
    let found = doc.select(&COUNTRY_LINK).filter_map(|a| {
        let href = a.value().attr("href").unwrap_or("");
        let (id, slug) = parse_country_path(href)?;
        Some(Country { id, slug, name: element_text(&a) })
    });
    first_per_id(found)
}

/// Strategy 3: the page a probe for one id ended up on.
/// The site redirects `/countries/{id}/x` to the canonical slug.
pub fn parse_probe(final_url: &str, html: &str) -> Option<Country> {
    let (id, slug) = parse_country_path(final_url)?;
    let doc = Html::parse_document(html);
    let name = doc
        .select(&PAGE_TITLE)
        .map(|el| element_text(&el))
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| slug.clone());
    Some(Country { id, slug, name })
}

fn first_per_id(found: impl Iterator<Item = Country>) -> Vec<Country> {
    let mut seen = HashSet::new();
    found.filter(|c| seen.insert(c.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
        <html><body>
          <select id="country-select">
            <option value="">Select a country</option>
            <option value="/international-investment-agreements/countries/1/afghanistan">Afghanistan</option>
            <option value="/international-investment-agreements/countries/2/albania"> Albania </option>
            <option value="/international-investment-agreements/countries/78/germany">Germany</option>
            <option value="/international-investment-agreements/countries/78/germany">Germany (dup)</option>
          </select>
          <a href="/international-investment-agreements/countries/5/andorra">Andorra</a>
        </body></html>"#;

    #[test]
    fn options_become_targets_in_page_order() {
        let got = parse_select_options(SEED);
        let ids: Vec<u32> = got.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 2, 78]);
        assert_eq!(got[1].name, "Albania");
        assert_eq!(got[2].slug, "germany");
    }

    #[test]
    fn links_are_the_fallback() {
        let html = r#"<ul>
            <li><a href="/international-investment-agreements/countries/5/andorra">Andorra</a></li>
            <li><a href="/international-investment-agreements/countries/5/andorra">again</a></li>
            <li><a href="/international-investment-agreements/countries/6/angola">Angola</a></li>
            <li><a href="/international-investment-agreements/by-economy">Economies</a></li>
        </ul>"#;
        assert!(parse_select_options(html).is_empty());
        let got = parse_country_links(html);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "Andorra");
        assert_eq!(got[1].id, 6);
    }

    #[test]
    fn probe_reads_redirect_target_and_heading() {
        let got = parse_probe(
            "https://investmentpolicy.unctad.org/international-investment-agreements/countries/9/argentina",
            "<html><body><h1> Argentina </h1></body></html>",
        )
        .unwrap();
        assert_eq!(got, Country { id: 9, slug: s!("argentina"), name: s!("Argentina") });

        let nameless = parse_probe("https://x/countries/10/armenia", "<p>no heading</p>").unwrap();
        assert_eq!(nameless.name, "armenia");

        assert!(parse_probe("https://x/international-investment-agreements", "").is_none());
    }
}
