use colored::Colorize;

use crate::cli::open_session;
use crate::error::Result;
use crate::models::{
    normalize_date, Record, Status, COMPANY_OPTIONS, MAIL_TYPE_OPTIONS, PLATFORM_OPTIONS,
};

#[allow(clippy::too_many_arguments)]
pub fn run(
    email: &str,
    company: &str,
    password: &str,
    holder: &str,
    remarks: &str,
    platform: &str,
    purchased: &str,
    expires: &str,
    mail_type: &str,
    status: &str,
) -> Result<()> {
    let record = Record {
        company_name: company.trim().to_string(),
        email_account: email.trim().to_string(),
        password: password.to_string(),
        account_holder: holder.trim().to_string(),
        remarks: remarks.trim().to_string(),
        subscription_platform: platform.trim().to_string(),
        purchase_date: normalize_date(purchased),
        expiry_date: normalize_date(expires),
        mail_type: mail_type.trim().to_string(),
        status: Status::parse(status),
    };

    // The interactive front end offered these as closed dropdowns; the CLI
    // accepts free text but points out values outside the usual lists.
    for (value, options, label) in [
        (company, COMPANY_OPTIONS, "company"),
        (platform, PLATFORM_OPTIONS, "platform"),
        (mail_type, MAIL_TYPE_OPTIONS, "mail type"),
    ] {
        let v = value.trim();
        if !v.is_empty() && !options.iter().any(|o| o.eq_ignore_ascii_case(v)) {
            println!("{} unrecognized {label}: {v}", "Note:".yellow());
        }
    }

    let mut session = open_session()?;
    session.add(record)?;
    println!("{} {email}", "Added".green());
    Ok(())
}
