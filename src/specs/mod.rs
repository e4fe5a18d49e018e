// src/specs/mod.rs
//! # Page specs
//!
//! One module per page type on the IIA Navigator. Each spec encodes *where
//! the data lives in the HTML* and *how to pull it out*:
//!
//! - `countries` – crawl targets from the seed page's country selector, the
//!   sidebar links, or a single probed page.
//! - `treaties` – the treaty table of one country page.
//! - `treaty_detail` – the "Type of termination" field of a treaty page.
//!
//! Specs are pure: HTML string in, typed records out. No fetching, no
//! sleeping, no checkpoint I/O; the `scrape` layer decides when to load
//! which page. That keeps every spec testable offline against saved pages.
//!
//! Conventions:
//! - Selectors are compiled once (`LazyLock`) from string literals.
//! - Cell text is whitespace-collapsed via `core::sanitize::element_text`.
//! - Missing pieces yield empty strings / `None`, never errors; a page that
//!   changed shape shows up as "0 rows" in the logs rather than a crash.

pub mod countries;
pub mod treaties;
pub mod treaty_detail;

use scraper::Selector;

/// Compile a selector literal.
pub(crate) fn css(literal: &'static str) -> Selector {
    Selector::parse(literal).expect("static selector")
}
