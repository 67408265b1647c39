use std::io::Write;

use colored::Colorize;

use crate::error::Result;
use crate::models::COLUMNS;
use crate::settings::{default_store_path, save_settings, settings_file_exists, Settings};
use crate::table::CsvTable;

pub fn run(
    store: Option<String>,
    user: Option<String>,
    password: Option<String>,
    chunk_size: usize,
    write_delay_ms: u64,
) -> Result<()> {
    if settings_file_exists() {
        println!("{}", "Existing settings will be overwritten.".yellow());
    }

    let store_path = store.unwrap_or_else(|| default_store_path().to_string_lossy().to_string());
    let username = match user {
        Some(u) => u,
        None => {
            print!("Username: ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line.trim().to_string()
        }
    };
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };

    let settings = Settings {
        store_path: store_path.clone(),
        username,
        password,
        write_chunk_size: chunk_size,
        write_delay_ms,
    };
    save_settings(&settings)?;

    let table = CsvTable::new(&store_path);
    table.create_if_missing(&COLUMNS)?;

    println!("{} store at {store_path}", "Initialized".green());
    Ok(())
}
