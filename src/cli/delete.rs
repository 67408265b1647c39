use colored::Colorize;

use crate::cli::open_session;
use crate::error::Result;

pub fn run(email: &str) -> Result<()> {
    let mut session = open_session()?;
    session.delete(email)?;
    println!("{} {email}", "Deleted".green());
    Ok(())
}
