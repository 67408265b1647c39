use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{MailkeepError, Result};
use crate::models::{Record, COLUMNS};

/// Outcome counts for a bulk import, for the post-merge summary.
pub struct ImportReport {
    pub added: usize,
    pub replaced: usize,
    pub total: usize,
}

/// Check that a batch header exposes at least the full fixed column set.
/// Matching is trim + case-insensitive; extra columns are fine. Returns the
/// position of each defined column in the header.
pub fn validate_header(header: &[String]) -> Result<Vec<usize>> {
    let mut positions = Vec::with_capacity(COLUMNS.len());
    let mut missing = Vec::new();
    for col in COLUMNS {
        match header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(col))
        {
            Some(p) => positions.push(p),
            None => missing.push(col),
        }
    }
    if !missing.is_empty() {
        return Err(MailkeepError::SchemaMismatch(missing.join(", ")));
    }
    Ok(positions)
}

/// Parse a delimited batch file into records, validating the header first.
/// Blank rows are dropped the same way the store drops them on load.
pub fn read_batch(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let header: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let positions = validate_header(&header)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let cells: Vec<String> = positions
            .iter()
            .map(|&p| row.get(p).unwrap_or("").to_string())
            .collect();
        let record = Record::from_cells(&cells);
        if !record.is_blank() {
            records.push(record);
        }
    }
    Ok(records)
}

/// Merge an incoming batch into the current table with at-most-one-record-
/// per-email semantics: current-then-incoming, last occurrence of each
/// email wins, and a surviving record sits at the first position its email
/// appeared at. Inputs are never mutated.
///
/// The empty string is a valid key under this scheme, so every record with
/// no email collapses to one. That matches the behavior of the tool this
/// replaces; it is a known weak point, not something to validate away here.
pub fn merge(current: &[Record], incoming: &[Record]) -> Vec<Record> {
    let mut out: Vec<Record> = Vec::with_capacity(current.len() + incoming.len());
    let mut seen_at: HashMap<String, usize> = HashMap::new();
    for record in current.iter().chain(incoming.iter()) {
        match seen_at.get(&record.email_account) {
            Some(&i) => out[i] = record.clone(),
            None => {
                seen_at.insert(record.email_account.clone(), out.len());
                out.push(record.clone());
            }
        }
    }
    out
}

impl ImportReport {
    pub fn compute(current: &[Record], incoming: &[Record]) -> Self {
        let existing: HashSet<&str> =
            current.iter().map(|r| r.email_account.as_str()).collect();
        let mut batch_keys: HashSet<&str> = HashSet::new();
        let mut added = 0;
        let mut replaced = 0;
        for record in incoming {
            let key = record.email_account.as_str();
            if !batch_keys.insert(key) {
                continue;
            }
            if existing.contains(key) {
                replaced += 1;
            } else {
                added += 1;
            }
        }
        Self {
            added,
            replaced,
            total: incoming.len(),
        }
    }
}
