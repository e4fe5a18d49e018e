// src/specs/treaties.rs
//! Treaty table of one country page.
//!
//! Layout (one `<tr>` per treaty, header rows have fewer cells):
//!
//! ```text
//! | # | Short title | Type | Status | Parties | Signature | Entry into force | Termination | Text |
//! ```
//!
//! Current markup tags each `<td>` with `data-index`; when it does, cells are
//! read by index, with the off-by-one fallback for layouts that dropped the
//! row-number column. Without `data-index`, cells are read by position.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::css;
use crate::core::sanitize::element_text;
use crate::data::{Country, RawTreaty};

/// Rows with fewer cells are headers or junk.
pub const MIN_CELLS: usize = 6;

static ROW: LazyLock<Selector> = LazyLock::new(|| css("table tbody tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| css("td"));
static TREATY_LINK: LazyLock<Selector> = LazyLock::new(|| css("a[href*='/treaties/']"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| css("table"));
static BODY: LazyLock<Selector> = LazyLock::new(|| css("body"));

static NO_RESULTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bno (agreements?|treaties|data|records|results|entries)\b").expect("static pattern")
});

pub fn parse_country_page(html: &str, country: &Country) -> Vec<RawTreaty> {
    let doc = Html::parse_document(html);
    doc.select(&ROW).filter_map(|row| parse_row(row, country)).collect()
}

/// Does the page have a treaty table at all?
pub fn has_table(html: &str) -> bool {
    Html::parse_document(html).select(&ROW).next().is_some()
}

/// Did the page finish building? A table shell (even empty) or an explicit
/// "no agreements" notice counts; a bare page skeleton does not.
pub fn looks_rendered(html: &str) -> bool {
    let doc = Html::parse_document(html);
    if doc.select(&TABLE).next().is_some() {
        return true;
    }
    doc.select(&BODY).next().is_some_and(|b| NO_RESULTS.is_match(&element_text(&b)))
}

fn parse_row(row: ElementRef, country: &Country) -> Option<RawTreaty> {
    let cells: Vec<ElementRef> = row.select(&CELL).collect();
    if cells.len() < MIN_CELLS {
        return None;
    }

    let treaty_url = row
        .select(&TREATY_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|h| s!(h.trim()))
        .unwrap_or_default();

    let by_index: HashMap<&str, String> = cells
        .iter()
        .filter_map(|c| {
            let idx = c.value().attr("data-index").filter(|i| !i.is_empty())?;
            Some((idx, element_text(c)))
        })
        .collect();

    let mut t = if by_index.is_empty() {
        let texts: Vec<String> = cells.iter().map(element_text).collect();
        let at = |i: usize| texts.get(i).cloned().unwrap_or_default();
        RawTreaty {
            short_title: at(1),
            treaty_type: at(2),
            status: at(3),
            parties_raw: at(4),
            date_of_signature: at(5),
            date_of_entry_into_force: at(6),
            date_of_termination: at(7),
            ..RawTreaty::default()
        }
    } else {
        let pick = |primary: &str, fallback: &str| {
            by_index.get(primary).or_else(|| by_index.get(fallback)).cloned().unwrap_or_default()
        };
        RawTreaty {
            short_title: pick("2", "1"),
            treaty_type: pick("3", "2"),
            status: pick("4", "3"),
            parties_raw: pick("5", "4"),
            date_of_signature: pick("6", "5"),
            date_of_entry_into_force: pick("7", "6"),
            date_of_termination: pick("8", "7"),
            ..RawTreaty::default()
        }
    };

    t.treaty_url = treaty_url;
    t.treaty_type = normalize_type(&t.treaty_type);
    t.source_country = country.name.clone();
    t.source_country_id = country.id;
    Some(t)
}

/// "Bilateral Investment Treaties", "BIT" → `BIT`; any other label → `TIP`.
pub fn normalize_type(label: &str) -> String {
    let lc = label.trim().to_lowercase();
    if lc.contains("bit") || lc.contains("bilateral investment") {
        s!("BIT")
    } else if lc.is_empty() {
        s!()
    } else {
        s!("TIP")
    }
}
