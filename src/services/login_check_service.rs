use crate::database::AuditStore;
use crate::models::SampleUser;
use crate::utils::{AuditError, Report};
use bcrypt::HashParts;
use std::io::Write;
use std::str::FromStr;

/// Prefixo que o backend grava (bcrypt versão 2b)
pub const BCRYPT_PREFIX: &str = "$2b$";
const PREVIEW_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum HashFormat {
    Missing,
    /// `cost` is `None` when the prefix matches but the rest does not parse
    Bcrypt { cost: Option<u32> },
    Unrecognized,
}

pub fn classify_password_hash(hash: Option<&str>) -> HashFormat {
    match hash {
        None | Some("") => HashFormat::Missing,
        Some(h) if h.starts_with(BCRYPT_PREFIX) => HashFormat::Bcrypt {
            cost: HashParts::from_str(h).ok().map(|parts| parts.get_cost()),
        },
        Some(_) => HashFormat::Unrecognized,
    }
}

/// First characters of the hash, safe on any UTF-8 input
pub fn hash_preview(hash: &str) -> String {
    hash.chars().take(PREVIEW_CHARS).collect()
}

/// Step 5: advisory check of one arbitrary user's password hash.
/// Returns `None` when the users collection is empty.
pub async fn check_sample_user<S, W>(
    store: &S,
    report: &mut Report<W>,
) -> Result<Option<HashFormat>, AuditError>
where
    S: AuditStore + ?Sized,
    W: Write,
{
    report.line("🔐 Step 5: Testing login functionality...");

    let Some(user) = store.sample_user().await? else {
        report.line("   ⚠️  No users found in database");
        report.blank();
        return Ok(None);
    };

    let format = report_sample(&user, report);
    report.blank();
    Ok(Some(format))
}

fn report_sample<W: Write>(user: &SampleUser, report: &mut Report<W>) -> HashFormat {
    let format = classify_password_hash(user.password_hash.as_deref());

    report.line(format!(
        "   Sample user: {}",
        user.email.as_deref().unwrap_or("<no email>")
    ));
    report.line(format!(
        "   Password hash exists: {}",
        if format == HashFormat::Missing { "❌ No" } else { "✅ Yes" }
    ));

    if let Some(hash) = user.password_hash.as_deref().filter(|h| !h.is_empty()) {
        report.line(format!("   Password hash format: {}...", hash_preview(hash)));
    }

    match &format {
        HashFormat::Bcrypt { cost } => {
            report.line("   ✅ Password hash format is correct (bcrypt)");
            if let Some(cost) = cost {
                report.line(format!("   🔑 bcrypt cost: {}", cost));
            }
        }
        HashFormat::Unrecognized => {
            report.line("   ⚠️  Password hash format might be incorrect");
        }
        HashFormat::Missing => {}
    }

    format
}
