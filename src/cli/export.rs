use std::path::PathBuf;

use colored::Colorize;

use crate::cli::open_session;
use crate::error::Result;
use crate::export::default_export_path;

pub fn run(output: Option<String>) -> Result<()> {
    let session = open_session()?;
    let path = match output {
        Some(p) => PathBuf::from(p),
        None => default_export_path(),
    };
    session.export(&path)?;
    println!(
        "{} {} account(s) to {} (passwords excluded)",
        "Exported".green(),
        session.records().len(),
        path.display()
    );
    Ok(())
}
