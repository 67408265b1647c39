use std::path::Path;

use colored::Colorize;

use crate::cli::open_session;
use crate::error::Result;
use crate::merger::read_batch;

pub fn run(file: &str) -> Result<()> {
    // Parse and schema-validate before logging in, so a bad batch never
    // reaches the store.
    let incoming = read_batch(Path::new(file))?;

    let mut session = open_session()?;
    let report = session.import(&incoming)?;

    println!(
        "{}: {} row(s) in batch, {} added, {} replaced",
        "Imported".green(),
        report.total,
        report.added,
        report.replaced
    );
    Ok(())
}
