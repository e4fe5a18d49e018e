// src/specs/treaty_detail.rs
//! "Type of termination" from a treaty detail page.
//!
//! Metadata sits in `div.form-group` blocks: a `<label>` followed by the
//! value as loose text or a nested element.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::css;
use crate::core::sanitize::{element_text, normalize_ws, own_text};

static FORM_GROUP: LazyLock<Selector> = LazyLock::new(|| css("div.form-group"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| css("label"));
static ANY: LazyLock<Selector> = LazyLock::new(|| css("body *"));

static LABEL_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)type of termination").expect("static pattern"));
static UP_TO_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*type of termination\s*:?\s*").expect("static pattern"));

pub fn parse_termination_type(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    from_form_groups(&doc).or_else(|| from_label_text(&doc))
}

fn from_form_groups(doc: &Html) -> Option<String> {
    for group in doc.select(&FORM_GROUP) {
        let Some(label) = group.select(&LABEL).next() else { continue };
        let label_text = element_text(&label);
        let lc = label_text.to_lowercase();
        if !(lc.contains("termination") && lc.contains("type")) {
            continue;
        }
        let value = normalize_ws(&element_text(&group).replace(&label_text, ""));
        if !value.is_empty() {
            return Some(value);
        }
    }
    None
}

/// Markup without form groups: find the label text anywhere and read what follows it.
fn from_label_text(doc: &Html) -> Option<String> {
    let label = doc.select(&ANY).find(|el| LABEL_TEXT.is_match(&own_text(el)))?;
    let container = closest_form_group(label)
        .or_else(|| label.parent().and_then(ElementRef::wrap))
        .unwrap_or(label);

    let text = element_text(&container);
    let value = UP_TO_VALUE.replace(&text, "");
    let value = value.trim();
    (!value.is_empty()).then(|| s!(value))
}

fn closest_form_group(el: ElementRef) -> Option<ElementRef> {
    std::iter::once(el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .find(|e| e.value().classes().any(|c| c == "form-group"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_form_group_value() {
        let html = r#"<div class="form-group"><label>Date of signature</label> 19/04/2005</div>
            <div class="form-group">
              <label>Type of termination</label>
              <span>Replaced by new treaty</span>
            </div>"#;
        assert_eq!(parse_termination_type(html).as_deref(), Some("Replaced by new treaty"));
    }

    #[test]
    fn empty_group_falls_through() {
        let html = r#"<div class="form-group"><label>Type of termination</label></div>"#;
        assert_eq!(parse_termination_type(html), None);
    }

    #[test]
    fn label_text_outside_form_groups() {
        let html = r#"<table><tr><td><b>Type of Termination:</b> Unilaterally denounced</td></tr></table>"#;
        assert_eq!(parse_termination_type(html).as_deref(), Some("Unilaterally denounced"));
    }

    #[test]
    fn nothing_to_find() {
        assert_eq!(parse_termination_type("<p>Status: In force</p>"), None);
    }
}
