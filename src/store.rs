use std::time::Duration;

use crate::error::Result;
use crate::models::{Record, COLUMNS};
use crate::table::RowTable;

/// Single source of truth for reading the full record table from, and
/// writing it back to, an external row table.
///
/// Saves are always a full overwrite: clear, then header plus every data
/// row. The external store offers no transactional row update through the
/// thin interface we use, and volumes are small, so the consistency model is
/// last full write wins. Do not replace this with incremental patching.
pub struct RecordStore<T: RowTable> {
    table: T,
    chunk_size: usize,
    write_delay: Duration,
}

impl<T: RowTable> RecordStore<T> {
    pub fn new(table: T, chunk_size: usize, write_delay_ms: u64) -> Self {
        Self {
            table,
            chunk_size: chunk_size.max(1),
            write_delay: Duration::from_millis(write_delay_ms),
        }
    }

    /// Fetch and normalize all records, in store order.
    ///
    /// Tolerates an empty store, unknown extra columns (ignored), and missing
    /// defined columns (synthesized as empty for every row). Cells are
    /// normalized to text, sentinel placeholders collapse to empty, and rows
    /// that are blank across every column are dropped.
    pub fn load(&self) -> Result<Vec<Record>> {
        let rows = self.table.read_all_rows()?;
        let Some((header, data)) = rows.split_first() else {
            return Ok(Vec::new());
        };

        // Position of each defined column in the stored header; None means
        // the column is missing and gets synthesized as empty.
        let positions: Vec<Option<usize>> = COLUMNS
            .iter()
            .map(|col| {
                header
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(col))
            })
            .collect();

        let mut records = Vec::with_capacity(data.len());
        for row in data {
            // Align raw cells to the defined column order; normalization
            // happens in from_cells.
            let cells: Vec<String> = positions
                .iter()
                .map(|pos| {
                    pos.and_then(|p| row.get(p))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
            let record = Record::from_cells(&cells);
            if !record.is_blank() {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Persist the full table: clear the store, then write the header row and
    /// every data row. Writes go out in chunks with a fixed delay between
    /// them to respect the external API's request-rate limit.
    ///
    /// A failure partway leaves the store possibly partial; the caller must
    /// not assume store and memory agree until save returns Ok.
    pub fn save(&mut self, records: &[Record]) -> Result<()> {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len() + 1);
        rows.push(COLUMNS.iter().map(|c| c.to_string()).collect());
        rows.extend(records.iter().map(Record::to_row));

        self.table.clear_all()?;
        let mut start_row = 0;
        for (i, chunk) in rows.chunks(self.chunk_size).enumerate() {
            if i > 0 {
                std::thread::sleep(self.write_delay);
            }
            self.table.write_rows(chunk, start_row)?;
            start_row += chunk.len();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailkeepError;
    use crate::models::Status;
    use crate::table::MemoryTable;

    fn header() -> Vec<String> {
        COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    fn sample(email: &str) -> Record {
        Record {
            company_name: "Acme Corp".into(),
            email_account: email.into(),
            password: "pw".into(),
            account_holder: "Dana".into(),
            remarks: String::new(),
            subscription_platform: "Zoho".into(),
            purchase_date: "2024-01-01".into(),
            expiry_date: "2025-01-01".into(),
            mail_type: "Primary".into(),
            status: Status::Active,
        }
    }

    fn store(table: MemoryTable) -> RecordStore<MemoryTable> {
        RecordStore::new(table, 100, 0)
    }

    #[test]
    fn test_load_empty_store() {
        let s = store(MemoryTable::new());
        assert!(s.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_header_only() {
        let s = store(MemoryTable::with_rows(vec![header()]));
        assert!(s.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_records_and_order() {
        let records = vec![sample("a@x"), sample("b@x"), sample("c@x")];
        let mut s = store(MemoryTable::new());
        s.save(&records).unwrap();
        assert_eq!(s.load().unwrap(), records);
    }

    #[test]
    fn test_load_repairs_missing_columns() {
        // Store only has three of the defined columns.
        let rows = vec![
            vec!["Email Account".to_string(), "Company Name".to_string(), "Status".to_string()],
            vec!["a@x".to_string(), "Acme Corp".to_string(), "Closed".to_string()],
        ];
        let s = store(MemoryTable::with_rows(rows));
        let loaded = s.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].email_account, "a@x");
        assert_eq!(loaded[0].company_name, "Acme Corp");
        assert_eq!(loaded[0].status, Status::Closed);
        assert_eq!(loaded[0].password, "");
        assert_eq!(loaded[0].purchase_date, "");
    }

    #[test]
    fn test_load_ignores_unknown_columns() {
        let mut hdr = header();
        hdr.push("Internal Notes".to_string());
        let mut row = sample("a@x").to_row();
        row.push("do not propagate".to_string());
        let s = store(MemoryTable::with_rows(vec![hdr, row]));
        let loaded = s.load().unwrap();
        assert_eq!(loaded, vec![sample("a@x")]);
    }

    #[test]
    fn test_load_normalizes_sentinels_and_dates() {
        let mut row = sample("a@x").to_row();
        row[4] = "nan".to_string(); // remarks
        row[6] = "01/15/2024".to_string(); // purchase date
        row[7] = "NaT".to_string(); // expiry date
        let s = store(MemoryTable::with_rows(vec![header(), row]));
        let loaded = s.load().unwrap();
        assert_eq!(loaded[0].remarks, "");
        assert_eq!(loaded[0].purchase_date, "2024-01-15");
        assert_eq!(loaded[0].expiry_date, "");
    }

    #[test]
    fn test_load_drops_fully_blank_rows() {
        let blank = vec![String::new(); COLUMNS.len()];
        let sentinel_blank = vec!["nan".to_string(); COLUMNS.len()];
        let s = store(MemoryTable::with_rows(vec![
            header(),
            blank,
            sample("a@x").to_row(),
            sentinel_blank,
        ]));
        let loaded = s.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].email_account, "a@x");
    }

    #[test]
    fn test_save_chunks_large_batches() {
        let records: Vec<Record> = (0..25).map(|i| sample(&format!("u{i}@x"))).collect();
        let mut s = RecordStore::new(MemoryTable::new(), 10, 0);
        s.save(&records).unwrap();
        // 26 rows (header + 25) in chunks of 10.
        assert_eq!(s.table.write_calls, vec![10, 10, 6]);
        assert_eq!(s.load().unwrap(), records);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let mut s = store(MemoryTable::new());
        s.save(&[sample("old@x"), sample("gone@x")]).unwrap();
        s.save(&[sample("new@x")]).unwrap();
        let loaded = s.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].email_account, "new@x");
    }

    #[test]
    fn test_save_failure_surfaces_store_write() {
        let mut table = MemoryTable::new();
        table.fail_after_writes = Some(1);
        let mut s = RecordStore::new(table, 10, 0);
        let records: Vec<Record> = (0..25).map(|i| sample(&format!("u{i}@x"))).collect();
        match s.save(&records) {
            Err(MailkeepError::StoreWrite(_)) => {}
            other => panic!("expected StoreWrite, got {other:?}"),
        }
        // First chunk landed; the store is partial, as documented.
        assert_eq!(s.table.write_calls, vec![10]);
    }
}
