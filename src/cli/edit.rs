use colored::Colorize;

use crate::cli::open_session;
use crate::error::Result;
use crate::models::{normalize_date, Status};

pub struct FieldPatch {
    pub company: Option<String>,
    pub password: Option<String>,
    pub holder: Option<String>,
    pub remarks: Option<String>,
    pub platform: Option<String>,
    pub purchased: Option<String>,
    pub expires: Option<String>,
    pub mail_type: Option<String>,
    pub status: Option<String>,
}

pub fn run(email: &str, patch: FieldPatch) -> Result<()> {
    let mut session = open_session()?;
    session.update(email, |r| {
        if let Some(v) = patch.company {
            r.company_name = v;
        }
        if let Some(v) = patch.password {
            r.password = v;
        }
        if let Some(v) = patch.holder {
            r.account_holder = v;
        }
        if let Some(v) = patch.remarks {
            r.remarks = v;
        }
        if let Some(v) = patch.platform {
            r.subscription_platform = v;
        }
        if let Some(v) = patch.purchased {
            r.purchase_date = normalize_date(&v);
        }
        if let Some(v) = patch.expires {
            r.expiry_date = normalize_date(&v);
        }
        if let Some(v) = patch.mail_type {
            r.mail_type = v;
        }
        if let Some(v) = patch.status {
            r.status = Status::parse(&v);
        }
    })?;
    println!("{} {email}", "Updated".green());
    Ok(())
}
