pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod status;

use clap::{Parser, Subcommand};

use crate::auth::{gather_credentials, Session, StaticCredentials};
use crate::error::Result;
use crate::settings::load_settings;
use crate::store::RecordStore;
use crate::table::CsvTable;

/// Authenticate and open a session against the configured store. Every
/// command that touches records goes through here; the session drops at the
/// end of the command, which is the logout boundary.
pub(crate) fn open_session() -> Result<Session<CsvTable>> {
    let settings = load_settings()?;
    let auth = StaticCredentials::from_settings(&settings);
    let (username, password) = gather_credentials()?;
    let table = CsvTable::new(&settings.store_path);
    let store = RecordStore::new(table, settings.write_chunk_size, settings.write_delay_ms);
    Session::login(&auth, &username, &password, store)
}

#[derive(Parser)]
#[command(
    name = "mailkeep",
    about = "Password-protected register of shared company email accounts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up mailkeep: store location, login credentials, write pacing.
    Init {
        /// Path of the backing store file (default: ~/Documents/mailkeep/accounts.csv)
        #[arg(long)]
        store: Option<String>,
        /// Login username
        #[arg(long)]
        user: Option<String>,
        /// Login password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Rows per write request
        #[arg(long = "chunk-size", default_value = "200")]
        chunk_size: usize,
        /// Delay between write requests, in milliseconds
        #[arg(long = "write-delay-ms", default_value = "1000")]
        write_delay_ms: u64,
    },
    /// List accounts (passwords masked unless --reveal).
    List {
        /// Filter by company name
        #[arg(long)]
        company: Option<String>,
        /// Filter by subscription platform
        #[arg(long)]
        platform: Option<String>,
        /// Filter by status: active, inactive, on-hold, closed
        #[arg(long)]
        status: Option<String>,
        /// Show stored passwords
        #[arg(long)]
        reveal: bool,
    },
    /// Add one account record.
    Add {
        /// Email account (the dedup key)
        email: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Account holder
        #[arg(long, default_value = "")]
        holder: String,
        #[arg(long, default_value = "")]
        remarks: String,
        /// Subscription platform
        #[arg(long, default_value = "")]
        platform: String,
        /// Purchase date: YYYY-MM-DD
        #[arg(long, default_value = "")]
        purchased: String,
        /// Expiry date: YYYY-MM-DD
        #[arg(long, default_value = "")]
        expires: String,
        /// Mail type, e.g. Primary, Alias, Shared, Service
        #[arg(long = "mail-type", default_value = "")]
        mail_type: String,
        /// Status: active, inactive, on-hold, closed
        #[arg(long, default_value = "active")]
        status: String,
    },
    /// Edit fields of the record with the given email.
    Edit {
        email: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        holder: Option<String>,
        #[arg(long)]
        remarks: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        purchased: Option<String>,
        #[arg(long)]
        expires: Option<String>,
        #[arg(long = "mail-type")]
        mail_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete the record with the given email.
    Delete { email: String },
    /// Bulk-import a CSV batch and merge it by email (incoming wins).
    Import {
        /// Path to the batch file
        file: String,
    },
    /// Export the table, minus passwords, to a dated CSV.
    Export {
        /// Output file path (default: email-accounts-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show settings and record counts.
    Status,
}
