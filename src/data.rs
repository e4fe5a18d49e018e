// src/data.rs
//! Record types flowing through the pipeline.
//!
//! `Country` → (country page) → `RawTreaty` → dedupe + normalize → `Treaty`.

use serde::{Deserialize, Serialize};

use crate::config::consts::COUNTRY_URL;
use crate::error::{Error, Result};

/// A crawl target: one country/economy page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    pub slug: String,
    pub name: String,
}

impl Country {
    pub fn url(&self) -> String {
        format!("{COUNTRY_URL}/{}/{}", self.id, self.slug)
    }
}

/// One row of a country's treaty table, as seen from that country's page.
/// The same treaty shows up once per party.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTreaty {
    pub treaty_url: String,
    pub short_title: String,
    pub treaty_type: String,
    pub status: String,
    pub parties_raw: String,
    pub date_of_signature: String,
    pub date_of_entry_into_force: String,
    pub date_of_termination: String,
    pub source_country: String,
    pub source_country_id: u32,
}

/// Column layout of the partial (checkpoint) file.
pub const RAW_COLUMNS: [&str; 10] = [
    "treaty_url",
    "short_title",
    "treaty_type",
    "status",
    "parties_raw",
    "date_of_signature",
    "date_of_entry_into_force",
    "date_of_termination",
    "source_country",
    "source_country_id",
];

impl RawTreaty {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.treaty_url.clone(),
            self.short_title.clone(),
            self.treaty_type.clone(),
            self.status.clone(),
            self.parties_raw.clone(),
            self.date_of_signature.clone(),
            self.date_of_entry_into_force.clone(),
            self.date_of_termination.clone(),
            self.source_country.clone(),
            self.source_country_id.to_string(),
        ]
    }

    pub fn from_row(row: &[String]) -> Result<Self> {
        let [url, title, ttype, status, parties, sign, entry, term, country, country_id] = row else {
            return Err(Error::Checkpoint(format!(
                "expected {} columns, got {}",
                RAW_COLUMNS.len(),
                row.len()
            )));
        };
        let source_country_id = country_id
            .trim()
            .parse()
            .map_err(|_| Error::Checkpoint(format!("bad country id `{country_id}`")))?;

        Ok(Self {
            treaty_url: url.clone(),
            short_title: title.clone(),
            treaty_type: ttype.clone(),
            status: status.clone(),
            parties_raw: parties.clone(),
            date_of_signature: sign.clone(),
            date_of_entry_into_force: entry.clone(),
            date_of_termination: term.clone(),
            source_country: country.clone(),
            source_country_id,
        })
    }
}

/// Exported record. Field order is the export column order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treaty {
    pub treaty_url: String,
    pub short_title: String,
    pub treaty_type: String,
    pub status: String,
    pub party_1: String,
    pub party_2: String,
    pub date_of_signature: String,
    pub date_of_entry_into_force: String,
    pub date_of_termination: String,
    pub termination_type: String,
}

pub const COLUMNS: [&str; 10] = [
    "treaty_url",
    "short_title",
    "treaty_type",
    "status",
    "party_1",
    "party_2",
    "date_of_signature",
    "date_of_entry_into_force",
    "date_of_termination",
    "termination_type",
];

impl Treaty {
    pub fn is_terminated(&self) -> bool {
        self.status.to_lowercase().contains("terminat")
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.treaty_url.clone(),
            self.short_title.clone(),
            self.treaty_type.clone(),
            self.status.clone(),
            self.party_1.clone(),
            self.party_2.clone(),
            self.date_of_signature.clone(),
            self.date_of_entry_into_force.clone(),
            self.date_of_termination.clone(),
            self.termination_type.clone(),
        ]
    }
}
