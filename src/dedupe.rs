// src/dedupe.rs
//! Every treaty is listed on each party's page; keep one copy.

use std::collections::HashSet;

use crate::data::RawTreaty;

/// Treaty URL when present, else the lower-cased title. `None` = unkeyable.
pub fn dedupe_key(t: &RawTreaty) -> Option<String> {
    let url = t.treaty_url.trim();
    if !url.is_empty() {
        return Some(s!(url));
    }
    let title = t.short_title.trim().to_lowercase();
    (!title.is_empty()).then_some(title)
}

/// First occurrence wins; input order is kept. Rows with no key are dropped.
pub fn deduplicate(treaties: Vec<RawTreaty>) -> Vec<RawTreaty> {
    let mut seen: HashSet<String> = HashSet::with_capacity(treaties.len());
    treaties
        .into_iter()
        .filter(|t| match dedupe_key(t) {
            Some(key) => seen.insert(key),
            None => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(url: &str, title: &str, from: &str) -> RawTreaty {
        RawTreaty {
            treaty_url: s!(url),
            short_title: s!(title),
            source_country: s!(from),
            ..RawTreaty::default()
        }
    }

    #[test]
    fn same_url_from_both_parties_collapses() {
        let out = deduplicate(vec![
            row("/t/1", "A - B BIT", "A"),
            row("/t/2", "A - C BIT", "A"),
            row("/t/1", "A - B BIT", "B"),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source_country, "A");
        assert_eq!(out[1].treaty_url, "/t/2");
    }

    #[test]
    fn title_is_the_fallback_key() {
        let out = deduplicate(vec![
            row("", "A - B BIT", "A"),
            row(" ", "a - b bit ", "B"),
        ]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn unkeyed_rows_are_dropped() {
        let out = deduplicate(vec![row("", "", "A"), row("/t/9", "", "A")]);
        assert_eq!(out.len(), 1);
        assert_eq!(dedupe_key(&out[0]).as_deref(), Some("/t/9"));
    }
}
