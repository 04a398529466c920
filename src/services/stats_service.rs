use crate::database::AuditStore;
use crate::models::USERS;
use crate::utils::{AuditError, Report};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::io::Write;

pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStats {
    pub total_users: u64,
    pub verified_users: u64,
    pub trial_users: u64,
    pub active_users: u64,
    pub profiles_with_photos: u64,
    pub recent_users: u64,
}

/// Integer floor percentage; 0 when `total` is 0
pub fn percentage(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (u128::from(part) * 100 / u128::from(total)) as u64
}

/// Cutoff for "new users", rendered like the stored `created_at` strings
/// (`2026-10-12T08:30:00.000000+00:00`)
pub fn recent_cutoff(now: DateTime<Utc>) -> String {
    (now - Duration::days(RECENT_WINDOW_DAYS)).to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Step 4
pub async fn collect_stats<S, W>(
    store: &S,
    report: &mut Report<W>,
    now: DateTime<Utc>,
) -> Result<UserStats, AuditError>
where
    S: AuditStore + ?Sized,
    W: Write,
{
    report.line("📊 Step 4: Database statistics...");

    let total_users = store.count_all(USERS).await?;
    let verified_users = store.count_verified_users().await?;
    let trial_users = store.count_users_with_status("trial").await?;
    let active_users = store.count_users_with_status("active").await?;

    report.line(format!("   👥 Total users: {}", total_users));
    report.line(format!(
        "   ✓  Verified: {} ({}%)",
        verified_users,
        percentage(verified_users, total_users)
    ));
    report.line(format!("   🆓 Trial: {}", trial_users));
    report.line(format!("   💎 Active: {}", active_users));

    let profiles_with_photos = store.count_profiles_with_photos().await?;
    report.line(format!("   📸 Profiles with photos: {}", profiles_with_photos));

    let recent_users = store.count_users_created_since(&recent_cutoff(now)).await?;
    report.line(format!(
        "   🆕 New users (last {} days): {}",
        RECENT_WINDOW_DAYS, recent_users
    ));
    report.blank();

    Ok(UserStats {
        total_users,
        verified_users,
        trial_users,
        active_users,
        profiles_with_photos,
        recent_users,
    })
}
