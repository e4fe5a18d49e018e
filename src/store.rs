// src/store.rs
//! Checkpointing.
//!
//! A long crawl (~230 pages at one per second plus retries) must survive an
//! interrupt. Progress is two files in the data dir:
//!
//! - `checkpoint.json` – ids of the countries fully scraped, row count, timestamp.
//! - `treaties_partial.csv` – every raw row collected so far, before dedupe.
//!
//! `--resume` reads both back and skips the finished countries.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::consts::{CHECKPOINT_FILE, PARTIAL_FILE};
use crate::csv::{parse_rows, rows_to_string};
use crate::data::{RAW_COLUMNS, RawTreaty};
use crate::error::{Error, Result};
use crate::file::ensure_directory;

const SEP: char = ',';

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub done_country_ids: Vec<u32>,
    pub treaty_count: usize,
    pub saved_at: DateTime<Utc>,
}

/// What `--resume` starts from.
#[derive(Debug, Default)]
pub struct ResumeState {
    pub done: BTreeSet<u32>,
    pub treaties: Vec<RawTreaty>,
}

pub fn save_checkpoint(dir: &Path, done: &BTreeSet<u32>, treaties: &[RawTreaty]) -> Result<()> {
    ensure_directory(dir)?;

    let rows: Vec<Vec<String>> = treaties.iter().map(RawTreaty::to_row).collect();
    fs::write(dir.join(PARTIAL_FILE), rows_to_string(Some(&RAW_COLUMNS[..]), &rows, SEP))?;

    // JSON last: it only ever points at rows already on disk.
    let ckpt = Checkpoint {
        done_country_ids: done.iter().copied().collect(),
        treaty_count: treaties.len(),
        saved_at: Utc::now(),
    };
    fs::write(dir.join(CHECKPOINT_FILE), serde_json::to_string_pretty(&ckpt)?)?;
    logd!("Checkpoint: {} countries, {} rows", done.len(), treaties.len());
    Ok(())
}

/// Missing checkpoint → empty state. Missing partial file → no rows.
pub fn load_checkpoint(dir: &Path) -> Result<ResumeState> {
    let ckpt_path = dir.join(CHECKPOINT_FILE);
    if !ckpt_path.exists() {
        return Ok(ResumeState::default());
    }
    let ckpt: Checkpoint = serde_json::from_str(&fs::read_to_string(&ckpt_path)?)?;

    let partial = dir.join(PARTIAL_FILE);
    let mut treaties = Vec::new();
    if partial.exists() {
        let text = fs::read_to_string(&partial)?;
        let mut rows = parse_rows(&text, SEP).into_iter().peekable();
        if rows.peek().and_then(|r| r.first()).is_some_and(|c| c == RAW_COLUMNS[0]) {
            rows.next();
        }
        for (line, row) in rows.enumerate() {
            let t = RawTreaty::from_row(&row)
                .map_err(|e| Error::Checkpoint(format!("{} row {}: {e}", partial.display(), line + 1)))?;
            treaties.push(t);
        }
    }

    if treaties.len() != ckpt.treaty_count {
        logw!(
            "Checkpoint says {} rows, partial file has {}; using the file",
            ckpt.treaty_count,
            treaties.len()
        );
    }
    logf!(
        "Resumed from checkpoint: {} countries done, {} treaties",
        ckpt.done_country_ids.len(),
        treaties.len()
    );
    Ok(ResumeState { done: ckpt.done_country_ids.into_iter().collect(), treaties })
}

pub fn clear_checkpoint(dir: &Path) -> Result<()> {
    for name in [CHECKPOINT_FILE, PARTIAL_FILE] {
        let p = dir.join(name);
        if p.exists() {
            fs::remove_file(&p)?;
        }
    }
    Ok(())
}
