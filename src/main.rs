mod auth;
mod cli;
mod error;
mod export;
mod fmt;
mod merger;
mod models;
mod settings;
mod store;
mod table;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            store,
            user,
            password,
            chunk_size,
            write_delay_ms,
        } => cli::init::run(store, user, password, chunk_size, write_delay_ms),
        Commands::List {
            company,
            platform,
            status,
            reveal,
        } => cli::list::run(company, platform, status, reveal),
        Commands::Add {
            email,
            company,
            password,
            holder,
            remarks,
            platform,
            purchased,
            expires,
            mail_type,
            status,
        } => cli::add::run(
            &email, &company, &password, &holder, &remarks, &platform, &purchased, &expires,
            &mail_type, &status,
        ),
        Commands::Edit {
            email,
            company,
            password,
            holder,
            remarks,
            platform,
            purchased,
            expires,
            mail_type,
            status,
        } => cli::edit::run(
            &email,
            cli::edit::FieldPatch {
                company,
                password,
                holder,
                remarks,
                platform,
                purchased,
                expires,
                mail_type,
                status,
            },
        ),
        Commands::Delete { email } => cli::delete::run(&email),
        Commands::Import { file } => cli::import::run(&file),
        Commands::Export { output } => cli::export::run(output),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
