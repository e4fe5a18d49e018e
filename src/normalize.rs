// src/normalize.rs
//! Field cleanup between dedupe and export.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::{RawTreaty, Treaty};

static DMY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})").expect("static pattern"));

/// `DD/MM/YYYY` → `YYYY-MM-DD`. Empty stays empty; anything else is passed through trimmed.
pub fn parse_date(raw: &str) -> String {
    let raw = raw.trim();
    match DMY.captures(raw) {
        Some(c) => format!("{}-{:0>2}-{:0>2}", &c[3], &c[2], &c[1]),
        None => s!(raw),
    }
}

/// Split `"Country A, Country B"` into the two parties.
///
/// Country names can carry commas in their UN form ("Korea, Republic of",
/// "Congo, Democratic Republic of the"). Tails like that are folded back into
/// the preceding name first. If that does not leave exactly two names, every
/// split point is tried and the last one whose right side starts with an
/// uppercase letter wins. No candidate → `(whole, "")`.
pub fn split_parties(raw: &str) -> (String, String) {
    let raw = raw.trim();
    let parts = fold_name_tails(raw.split(',').map(str::trim));
    if let [a, b] = parts.as_slice() {
        return (a.clone(), b.clone());
    }

    let mut candidate = None;
    for i in 1..parts.len() {
        let left = parts[..i].join(", ");
        let right = parts[i..].join(", ");
        let (left, right) = (left.trim(), right.trim());
        if !left.is_empty() && right.chars().next().is_some_and(char::is_uppercase) {
            candidate = Some((s!(left), s!(right)));
        }
    }
    candidate.unwrap_or_else(|| (s!(raw), s!()))
}

/// Merge inverted-name tails ("Republic of", "The") into the part before them.
fn fold_name_tails<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in parts {
        let lc = part.to_lowercase();
        let is_tail = lc.ends_with(" of") || lc.ends_with(" of the") || lc == "the";
        match out.last_mut() {
            Some(prev) if is_tail => {
                prev.push_str(", ");
                prev.push_str(part);
            }
            _ => out.push(s!(part)),
        }
    }
    out
}

/// Raw table row → export record. `termination_type` is filled later by enrichment.
pub fn normalize(raw: RawTreaty) -> Treaty {
    let (party_1, party_2) = split_parties(&raw.parties_raw);
    Treaty {
        party_1,
        party_2,
        date_of_signature: parse_date(&raw.date_of_signature),
        date_of_entry_into_force: parse_date(&raw.date_of_entry_into_force),
        date_of_termination: parse_date(&raw.date_of_termination),
        treaty_url: raw.treaty_url,
        short_title: raw.short_title,
        treaty_type: raw.treaty_type,
        status: raw.status,
        termination_type: s!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_are_reordered_and_padded() {
        assert_eq!(parse_date("5/3/1998"), "1998-03-05");
        assert_eq!(parse_date(" 21/11/2005 "), "2005-11-21");
        assert_eq!(parse_date(""), "");
        assert_eq!(parse_date("   "), "");
        assert_eq!(parse_date("n/a"), "n/a");
    }

    #[test]
    fn two_plain_parties() {
        assert_eq!(split_parties("Afghanistan, Germany"), (s!("Afghanistan"), s!("Germany")));
    }

    #[test]
    fn comma_inside_a_country_name() {
        assert_eq!(
            split_parties("Korea, Republic of, Germany"),
            (s!("Korea, Republic of"), s!("Germany"))
        );
    }

    #[test]
    fn inverted_name_in_second_place() {
        assert_eq!(
            split_parties("Afghanistan, Iran, Islamic Republic of"),
            (s!("Afghanistan"), s!("Iran, Islamic Republic of"))
        );
        assert_eq!(
            split_parties("Congo, Democratic Republic of the, Belgium"),
            (s!("Congo, Democratic Republic of the"), s!("Belgium"))
        );
    }

    #[test]
    fn more_than_two_names_uses_last_uppercase_split() {
        assert_eq!(
            split_parties("Afghanistan, Azerbaijan, Turkey"),
            (s!("Afghanistan, Azerbaijan"), s!("Turkey"))
        );
    }

    #[test]
    fn no_uppercase_split_keeps_everything_left() {
        assert_eq!(split_parties("Germany"), (s!("Germany"), s!()));
        assert_eq!(split_parties("a, b, c"), (s!("a, b, c"), s!()));
        assert_eq!(split_parties(""), (s!(), s!()));
    }

    #[test]
    fn normalize_fills_parties_and_dates() {
        let raw = RawTreaty {
            parties_raw: s!("Albania, Austria"),
            date_of_signature: s!("18/3/1991"),
            date_of_entry_into_force: s!("1/5/1993"),
            status: s!("In force"),
            ..RawTreaty::default()
        };
        let t = normalize(raw);
        assert_eq!((t.party_1.as_str(), t.party_2.as_str()), ("Albania", "Austria"));
        assert_eq!(t.date_of_signature, "1991-03-18");
        assert_eq!(t.date_of_entry_into_force, "1993-05-01");
        assert_eq!(t.date_of_termination, "");
        assert_eq!(t.termination_type, "");
    }
}
