use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailkeepError {
    #[error("Configuration error: {0}. Run `mailkeep init` to set up.")]
    Config(String),

    #[error("Store not found: {0}. Check the store path in your settings.")]
    StoreNotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store write failed partway; the store may hold a partial table. Cause: {0}")]
    StoreWrite(String),

    #[error("Import batch is missing required column(s): {0}")]
    SchemaMismatch(String),

    #[error("Missing required field: {0}")]
    Validation(String),

    #[error("Invalid username or password")]
    AuthFailed,

    #[error("Unknown email account: {0}")]
    UnknownRecord(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MailkeepError>;
