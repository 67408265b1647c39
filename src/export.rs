use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Record, COLUMNS};

/// Index of the Password column, which never leaves the tool in an export.
const PASSWORD_COLUMN: usize = 2;

/// Default export filename, named with the current date.
pub fn default_export_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y-%m-%d");
    PathBuf::from(format!("email-accounts-{stamp}.csv"))
}

/// Write the table to a delimited file with the Password column stripped.
pub fn write_export(records: &[Record], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let header: Vec<&str> = COLUMNS
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != PASSWORD_COLUMN)
        .map(|(_, c)| *c)
        .collect();
    wtr.write_record(&header)?;

    for record in records {
        let row = record.to_row();
        let cells: Vec<&String> = row
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != PASSWORD_COLUMN)
            .map(|(_, c)| c)
            .collect();
        wtr.write_record(cells)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    #[test]
    fn test_export_strips_password_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let record = Record {
            company_name: "Acme Corp".into(),
            email_account: "ops@acme.test".into(),
            password: "topsecret".into(),
            account_holder: "Dana".into(),
            remarks: "shared".into(),
            subscription_platform: "Zoho".into(),
            purchase_date: "2024-01-01".into(),
            expiry_date: "2025-01-01".into(),
            mail_type: "Shared".into(),
            status: Status::Active,
        };
        write_export(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("Password"));
        assert!(!content.contains("topsecret"));
        assert!(content.contains("ops@acme.test"));
        assert!(content.contains("Account Holder"));

        let header_cells = content.lines().next().unwrap().split(',').count();
        assert_eq!(header_cells, COLUMNS.len() - 1);
    }

    #[test]
    fn test_default_export_path_is_dated() {
        let name = default_export_path();
        let name = name.to_string_lossy();
        assert!(name.starts_with("email-accounts-"));
        assert!(name.ends_with(".csv"));
    }
}
