use comfy_table::{Cell, Table};

use crate::cli::open_session;
use crate::error::Result;
use crate::fmt::mask;
use crate::models::Status;

pub fn run(
    company: Option<String>,
    platform: Option<String>,
    status: Option<String>,
    reveal: bool,
) -> Result<()> {
    let session = open_session()?;
    let status_filter = status.as_deref().map(Status::parse);

    let rows: Vec<_> = session
        .records()
        .iter()
        .filter(|r| company.as_deref().map_or(true, |c| r.company_name.eq_ignore_ascii_case(c)))
        .filter(|r| {
            platform
                .as_deref()
                .map_or(true, |p| r.subscription_platform.eq_ignore_ascii_case(p))
        })
        .filter(|r| status_filter.map_or(true, |s| r.status == s))
        .collect();

    let mut table = Table::new();
    table.set_header(vec![
        "Company", "Email", "Password", "Holder", "Platform", "Purchased", "Expires", "Type",
        "Status", "Remarks",
    ]);
    for r in &rows {
        let password = if reveal {
            r.password.clone()
        } else {
            mask(&r.password)
        };
        table.add_row(vec![
            Cell::new(&r.company_name),
            Cell::new(&r.email_account),
            Cell::new(password),
            Cell::new(&r.account_holder),
            Cell::new(&r.subscription_platform),
            Cell::new(&r.purchase_date),
            Cell::new(&r.expiry_date),
            Cell::new(&r.mail_type),
            Cell::new(r.status.as_str()),
            Cell::new(&r.remarks),
        ]);
    }
    println!("{table}");
    println!("{} of {} account(s)", rows.len(), session.records().len());
    Ok(())
}
