use crate::cli::open_session;
use crate::error::Result;
use crate::fmt::days_until;
use crate::models::Status;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings()?;
    println!("Store:       {}", settings.store_path);
    println!("User:        {}", settings.username);
    println!(
        "Write pace:  {} rows per request, {} ms between requests",
        settings.write_chunk_size, settings.write_delay_ms
    );

    let session = open_session()?;
    let records = session.records();

    let count = |s: Status| records.iter().filter(|r| r.status == s).count();
    let expiring = records
        .iter()
        .filter(|r| matches!(days_until(&r.expiry_date), Some(d) if (0..=30).contains(&d)))
        .count();

    println!();
    println!("Accounts:    {}", records.len());
    println!("Active:      {}", count(Status::Active));
    println!("Inactive:    {}", count(Status::Inactive));
    println!("On Hold:     {}", count(Status::OnHold));
    println!("Closed:      {}", count(Status::Closed));
    println!("Expiring within 30 days: {expiring}");
    Ok(())
}
