/// Fixed-width mask for stored passwords in read-only views. Deliberately
/// not length-preserving.
pub fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "\u{2022}".repeat(8)
    }
}

/// Days from today until an ISO date. None when the cell is empty or not a
/// parseable date.
pub fn days_until(iso_date: &str) -> Option<i64> {
    let date = chrono::NaiveDate::parse_from_str(iso_date, "%Y-%m-%d").ok()?;
    let today = chrono::Local::now().date_naive();
    Some((date - today).num_days())
}
