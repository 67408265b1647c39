use std::io::Write;
use std::path::Path;

use zeroize::Zeroizing;

use crate::error::{MailkeepError, Result};
use crate::merger::{self, ImportReport};
use crate::models::Record;
use crate::settings::Settings;
use crate::store::RecordStore;
use crate::table::RowTable;

/// The trust boundary for the login check. The comparison strategy lives
/// behind this trait so it can be swapped (hashed storage, an external
/// identity provider) without touching the session or store code.
pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Plaintext equality against the two statically configured values.
///
/// Known weakness, preserved from the tool this replaces: the credential
/// pair sits in the settings file in plaintext and the compare is a direct
/// string equality. Swap in a different `Authenticator` to change that.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.username.clone(), settings.password.clone())
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Read credentials from `MAILKEEP_USER` / `MAILKEEP_PASSWORD`, or prompt.
/// The password is wiped when the returned guard drops.
pub fn gather_credentials() -> Result<(String, Zeroizing<String>)> {
    let username = match std::env::var("MAILKEEP_USER") {
        Ok(u) if !u.is_empty() => u,
        _ => {
            print!("Username: ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line.trim().to_string()
        }
    };
    let password = match std::env::var("MAILKEEP_PASSWORD") {
        Ok(p) if !p.is_empty() => Zeroizing::new(p),
        _ => Zeroizing::new(rpassword::prompt_password("Password: ")?),
    };
    Ok((username, password))
}

/// Per-login context: the authenticated user plus the in-memory table and
/// its backing store. Constructed by [`Session::login`], torn down when the
/// value drops at the end of the command. Every mutating operation persists
/// the full table before returning; there is no partial write path.
pub struct Session<T: RowTable> {
    pub user: String,
    store: RecordStore<T>,
    records: Vec<Record>,
}

impl<T: RowTable> Session<T> {
    /// Authenticate and populate the in-memory table with one full load.
    pub fn login(
        auth: &dyn Authenticator,
        username: &str,
        password: &str,
        store: RecordStore<T>,
    ) -> Result<Self> {
        if !auth.authenticate(username, password) {
            return Err(MailkeepError::AuthFailed);
        }
        let records = store.load()?;
        Ok(Self {
            user: username.to_string(),
            store,
            records,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Validate and append a manually entered record, then save. A
    /// validation reject leaves both memory and store untouched.
    pub fn add(&mut self, record: Record) -> Result<()> {
        record.validate()?;
        self.records.push(record);
        self.store.save(&self.records)
    }

    /// Patch the first record with the given email, then save. The patch is
    /// applied to a copy and validated before anything is committed.
    pub fn update(&mut self, email: &str, patch: impl FnOnce(&mut Record)) -> Result<()> {
        let pos = self
            .records
            .iter()
            .position(|r| r.email_account == email)
            .ok_or_else(|| MailkeepError::UnknownRecord(email.to_string()))?;
        let mut updated = self.records[pos].clone();
        patch(&mut updated);
        updated.validate()?;
        self.records[pos] = updated;
        self.store.save(&self.records)
    }

    /// Remove the first record with the given email, then save.
    pub fn delete(&mut self, email: &str) -> Result<()> {
        let pos = self
            .records
            .iter()
            .position(|r| r.email_account == email)
            .ok_or_else(|| MailkeepError::UnknownRecord(email.to_string()))?;
        self.records.remove(pos);
        self.store.save(&self.records)
    }

    /// Merge a bulk batch into the table under last-wins-per-email dedup,
    /// then save. An empty batch changes nothing but still saves, keeping
    /// the every-mutation-is-a-full-save model uniform.
    pub fn import(&mut self, incoming: &[Record]) -> Result<ImportReport> {
        let report = ImportReport::compute(&self.records, incoming);
        self.records = merger::merge(&self.records, incoming);
        self.store.save(&self.records)?;
        Ok(report)
    }

    /// Write the password-free export of the current table.
    pub fn export(&self, path: &Path) -> Result<()> {
        crate::export::write_export(&self.records, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::table::MemoryTable;

    fn rec(email: &str) -> Record {
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

    fn open_session() -> Session<MemoryTable> {
        let auth = StaticCredentials::new("admin", "secret");
        let store = RecordStore::new(MemoryTable::new(), 100, 0);
        Session::login(&auth, "admin", "secret", store).unwrap()
    }

    #[test]
    fn test_static_credentials_compare() {
        let auth = StaticCredentials::new("admin", "secret");
        assert!(auth.authenticate("admin", "secret"));
        assert!(!auth.authenticate("admin", "wrong"));
        assert!(!auth.authenticate("Admin", "secret"));
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let auth = StaticCredentials::new("admin", "secret");
        let store = RecordStore::new(MemoryTable::new(), 100, 0);
        match Session::login(&auth, "admin", "nope", store) {
            Err(MailkeepError::AuthFailed) => {}
            other => panic!("expected AuthFailed, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_add_persists_full_table() {
        let mut session = open_session();
        session.add(rec("a@x")).unwrap();
        session.add(rec("b@x")).unwrap();
        assert_eq!(session.records().len(), 2);
        // Header + 2 data rows in the backing table.
        assert_eq!(session.store.load().unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_invalid_without_writing() {
        let mut session = open_session();
        let mut bad = rec("a@x");
        bad.account_holder.clear();
        assert!(matches!(
            session.add(bad),
            Err(MailkeepError::Validation(_))
        ));
        assert!(session.records().is_empty());
        assert!(session.store.load().unwrap().is_empty());
    }

    #[test]
    fn test_update_patches_and_saves() {
        let mut session = open_session();
        session.add(rec("a@x")).unwrap();
        session
            .update("a@x", |r| r.status = Status::Closed)
            .unwrap();
        assert_eq!(session.records()[0].status, Status::Closed);
        assert_eq!(session.store.load().unwrap()[0].status, Status::Closed);
    }

    #[test]
    fn test_update_rejects_patch_that_empties_required_field() {
        let mut session = open_session();
        session.add(rec("a@x")).unwrap();
        let err = session.update("a@x", |r| r.password.clear());
        assert!(matches!(err, Err(MailkeepError::Validation(_))));
        // The bad patch never reached memory or the store.
        assert_eq!(session.records()[0].password, "pw");
    }

    #[test]
    fn test_update_unknown_email() {
        let mut session = open_session();
        assert!(matches!(
            session.update("ghost@x", |_| {}),
            Err(MailkeepError::UnknownRecord(_))
        ));
    }

    #[test]
    fn test_delete_removes_and_saves() {
        let mut session = open_session();
        session.add(rec("a@x")).unwrap();
        session.add(rec("b@x")).unwrap();
        session.delete("a@x").unwrap();
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.store.load().unwrap()[0].email_account, "b@x");
    }

    #[test]
    fn test_import_merges_and_saves() {
        let mut session = open_session();
        session.add(rec("a@x")).unwrap();
        let mut replacement = rec("a@x");
        replacement.status = Status::Closed;
        let report = session.import(&[replacement, rec("c@x")]).unwrap();
        assert_eq!(report.replaced, 1);
        assert_eq!(report.added, 1);
        let stored = session.store.load().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].status, Status::Closed);
    }

    #[test]
    fn test_import_empty_batch_still_saves() {
        let mut session = open_session();
        session.add(rec("a@x")).unwrap();
        let before = session.records().to_vec();
        let report = session.import(&[]).unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(session.records(), before.as_slice());
        assert_eq!(session.store.load().unwrap(), before);
    }
}
