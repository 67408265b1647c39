use crate::error::{MailkeepError, Result};

/// The fixed, ordered column set. This is the header contract between the
/// record store and the external row table: the store writes exactly these
/// columns in exactly this order, and repairs any stored table that is
/// missing some of them.
pub const COLUMNS: [&str; 10] = [
    "Company Name",
    "Email Account",
    "Password",
    "Account Holder",
    "Remarks",
    "Subscription Platform",
    "Purchase Date",
    "Expiry Date",
    "Mail Type",
    "Status",
];

/// Dropdown options offered by the interactive front end. Free text arriving
/// in an imported batch is not restricted to these.
pub const COMPANY_OPTIONS: &[&str] = &["Acme Corp", "Acme Media", "Acme Labs", "Other"];
pub const PLATFORM_OPTIONS: &[&str] = &["Google Workspace", "Microsoft 365", "Zoho", "Other"];
pub const MAIL_TYPE_OPTIONS: &[&str] = &["Primary", "Alias", "Shared", "Service"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Active,
    Inactive,
    OnHold,
    Closed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnHold => "On Hold",
            Self::Closed => "Closed",
        }
    }

    /// Lenient parse: the external store is free-form text, so anything
    /// unrecognized (including empty) falls back to the default, Active.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "inactive" => Self::Inactive,
            "on hold" | "on-hold" | "onhold" => Self::OnHold,
            "closed" => Self::Closed,
            _ => Self::Active,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the register. All fields are text; `email_account` is the
/// informal key used for dedup on import.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub company_name: String,
    pub email_account: String,
    pub password: String,
    pub account_holder: String,
    pub remarks: String,
    pub subscription_platform: String,
    pub purchase_date: String,
    pub expiry_date: String,
    pub mail_type: String,
    pub status: Status,
}

impl Record {
    /// Build a record from cells already aligned to [`COLUMNS`]. Cells are
    /// normalized on the way in: sentinels collapse to empty, dates are
    /// re-emitted as ISO text. Short rows are padded with empties.
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).map(|s| s.as_str()).unwrap_or("");
        Self {
            company_name: normalize_cell(cell(0)),
            email_account: normalize_cell(cell(1)),
            password: normalize_cell(cell(2)),
            account_holder: normalize_cell(cell(3)),
            remarks: normalize_cell(cell(4)),
            subscription_platform: normalize_cell(cell(5)),
            purchase_date: normalize_date(cell(6)),
            expiry_date: normalize_date(cell(7)),
            mail_type: normalize_cell(cell(8)),
            status: Status::parse(cell(9)),
        }
    }

    /// Serialize every field to text, in [`COLUMNS`] order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.company_name.clone(),
            self.email_account.clone(),
            self.password.clone(),
            self.account_holder.clone(),
            self.remarks.clone(),
            self.subscription_platform.clone(),
            self.purchase_date.clone(),
            self.expiry_date.clone(),
            self.mail_type.clone(),
            self.status.as_str().to_string(),
        ]
    }

    /// True when every cell other than the always-textual status is empty.
    /// Such rows are artifacts of the storage layer and are dropped on load.
    pub fn is_blank(&self) -> bool {
        self.company_name.is_empty()
            && self.email_account.is_empty()
            && self.password.is_empty()
            && self.account_holder.is_empty()
            && self.remarks.is_empty()
            && self.subscription_platform.is_empty()
            && self.purchase_date.is_empty()
            && self.expiry_date.is_empty()
            && self.mail_type.is_empty()
    }

    /// Required-field check for manually entered records. Remarks is the only
    /// optional field. Rejects with the first missing field so the caller can
    /// re-prompt without losing the other inputs.
    pub fn validate(&self) -> Result<()> {
        let required: [(&str, &str); 8] = [
            ("Company Name", &self.company_name),
            ("Email Account", &self.email_account),
            ("Password", &self.password),
            ("Account Holder", &self.account_holder),
            ("Subscription Platform", &self.subscription_platform),
            ("Purchase Date", &self.purchase_date),
            ("Expiry Date", &self.expiry_date),
            ("Mail Type", &self.mail_type),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(MailkeepError::Validation(name.to_string()));
            }
        }
        Ok(())
    }
}

/// Placeholder nulls the storage layer emits for blank cells.
fn is_sentinel(s: &str) -> bool {
    matches!(
        s.to_lowercase().as_str(),
        "nan" | "nat" | "none" | "null" | "#n/a" | "n/a"
    )
}

/// Trim a raw cell and collapse storage-layer sentinels to the empty string.
pub fn normalize_cell(raw: &str) -> String {
    let s = raw.trim();
    if is_sentinel(s) {
        String::new()
    } else {
        s.to_string()
    }
}

/// Normalize a date cell to ISO `YYYY-MM-DD` text. Sentinels and placeholder
/// nulls collapse to empty; text that does not parse under any accepted
/// format passes through trimmed.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() || is_sentinel(s) {
        return String::new();
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    s.to_string()
}
