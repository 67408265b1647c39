use std::path::{Path, PathBuf};

use crate::error::{MailkeepError, Result};

/// The external row-table store boundary. A table is an ordered blob of text
/// rows addressed by a stable identifier; the store above this trait only
/// ever reads it wholesale or rewrites it wholesale.
///
/// `write_rows` receives the absolute row offset the chunk starts at so a
/// remote backend can address its write range; the sequence of calls after a
/// `clear_all` always covers offsets 0..n with no gaps.
pub trait RowTable {
    /// Read every row. An empty table yields an empty vec.
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Delete all rows.
    fn clear_all(&mut self) -> Result<()>;

    /// Append a block of rows starting at `start_row` (0-based).
    fn write_rows(&mut self, rows: &[Vec<String>], start_row: usize) -> Result<()>;
}

/// File-backed table: one CSV file on disk, addressed by path.
pub struct CsvTable {
    path: PathBuf,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with a header row, if it does not exist yet.
    pub fn create_if_missing(&self, header: &[&str]) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(&self.path)?;
        wtr.write_record(header)?;
        wtr.flush()?;
        Ok(())
    }
}

impl RowTable for CsvTable {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        if !self.path.exists() {
            return Err(MailkeepError::StoreNotFound(self.path.display().to_string()));
        }
        let file = std::fs::File::open(&self.path).map_err(|e| {
            MailkeepError::StoreUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(std::io::BufReader::new(file));
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| {
                MailkeepError::StoreUnavailable(format!("{}: {e}", self.path.display()))
            })?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }
        Ok(rows)
    }

    fn clear_all(&mut self) -> Result<()> {
        std::fs::File::create(&self.path)
            .map_err(|e| MailkeepError::StoreWrite(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }

    fn write_rows(&mut self, rows: &[Vec<String>], _start_row: usize) -> Result<()> {
        let file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| MailkeepError::StoreWrite(format!("{}: {e}", self.path.display())))?;
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(file);
        for row in rows {
            wtr.write_record(row)
                .map_err(|e| MailkeepError::StoreWrite(e.to_string()))?;
        }
        wtr.flush()
            .map_err(|e| MailkeepError::StoreWrite(e.to_string()))?;
        Ok(())
    }
}

/// In-memory table for unit tests: records the size of every write call so
/// chunking behavior can be asserted, and can be told to fail partway.
#[cfg(test)]
pub struct MemoryTable {
    pub rows: Vec<Vec<String>>,
    pub write_calls: Vec<usize>,
    pub fail_after_writes: Option<usize>,
}

#[cfg(test)]
impl MemoryTable {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            write_calls: Vec::new(),
            fail_after_writes: None,
        }
    }

    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            write_calls: Vec::new(),
            fail_after_writes: None,
        }
    }
}

#[cfg(test)]
impl RowTable for MemoryTable {
    fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.rows.clear();
        Ok(())
    }

    fn write_rows(&mut self, rows: &[Vec<String>], _start_row: usize) -> Result<()> {
        if let Some(limit) = self.fail_after_writes {
            if self.write_calls.len() >= limit {
                return Err(MailkeepError::StoreWrite("simulated failure".to_string()));
            }
        }
        self.write_calls.push(rows.len());
        self.rows.extend(rows.iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_table_missing_file_is_store_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("missing.csv"));
        match table.read_all_rows() {
            Err(MailkeepError::StoreNotFound(_)) => {}
            other => panic!("expected StoreNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_csv_table_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = CsvTable::new(dir.path().join("t.csv"));
        table.create_if_missing(&["A", "B"]).unwrap();
        table
            .write_rows(&[vec!["1".into(), "2".into()], vec!["3".into(), "4".into()]], 1)
            .unwrap();
        let rows = table.read_all_rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["A", "B"]);
        assert_eq!(rows[2], vec!["3", "4"]);
    }

    #[test]
    fn test_csv_table_clear_all_empties_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = CsvTable::new(dir.path().join("t.csv"));
        table.create_if_missing(&["A"]).unwrap();
        table.write_rows(&[vec!["x".into()]], 1).unwrap();
        table.clear_all().unwrap();
        assert!(table.read_all_rows().unwrap().is_empty());
    }

    #[test]
    fn test_create_if_missing_does_not_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = CsvTable::new(dir.path().join("t.csv"));
        table.create_if_missing(&["A"]).unwrap();
        table.write_rows(&[vec!["x".into()]], 1).unwrap();
        table.create_if_missing(&["A"]).unwrap();
        assert_eq!(table.read_all_rows().unwrap().len(), 2);
    }
}
