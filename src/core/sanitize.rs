// src/core/sanitize.rs
use scraper::ElementRef;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Visible text of an element and its descendants, whitespace collapsed.
/// Text nodes are joined with a space so `<td>a<br>b</td>` reads "a b".
pub fn element_text(el: &ElementRef) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    normalize_ws(&joined)
}

/// Text nodes directly under `el`, ignoring child elements.
pub fn own_text(el: &ElementRef) -> String {
    let mut out = s!();
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        }
    }
    normalize_ws(&out)
}
