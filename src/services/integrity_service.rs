use crate::database::AuditStore;
use crate::models::{IdKey, ProfileRef, UserSummary, PROFILES, SUBSCRIPTIONS, USERS};
use crate::utils::{AuditError, Report};
use std::collections::HashSet;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct CountCheck {
    pub users: u64,
    pub others: u64,
}

impl CountCheck {
    pub fn matches(&self) -> bool {
        self.users == self.others
    }
}

#[derive(Debug, Clone)]
pub struct ProfileCheck {
    pub counts: CountCheck,
    pub orphans: Vec<UserSummary>,
}

/// Users whose `id` does not appear as any profile's `user_id`, in user order.
/// Users without an `id` cannot be matched and are skipped.
pub fn find_orphans(users: &[UserSummary], profiles: &[ProfileRef]) -> Vec<UserSummary> {
    let profile_user_ids: HashSet<IdKey> = profiles.iter().filter_map(ProfileRef::id_key).collect();

    let mut seen = HashSet::new();
    let mut orphans = Vec::new();

    for user in users {
        let Some(id) = user.id_key() else {
            log::warn!("⚠️  User without 'id' skipped: {}", user.display_email());
            continue;
        };
        if !profile_user_ids.contains(&id) && seen.insert(id) {
            orphans.push(user.clone());
        }
    }

    orphans
}

/// Counts users whose `password_hash` is missing, null or empty
pub async fn check_password_hashes<S, W>(store: &S, report: &mut Report<W>) -> Result<u64, AuditError>
where
    S: AuditStore + ?Sized,
    W: Write,
{
    let missing = store.count_users_without_password().await?;

    if missing > 0 {
        report.line(format!("   ⚠️  Found {} users without password_hash", missing));
        report.line("      These users might not be able to login!");
    } else {
        report.line("   ✅ All users have password_hash");
    }

    Ok(missing)
}

/// Compares users vs profiles; orphans are only resolved when the counts differ
pub async fn check_profiles<S, W>(store: &S, report: &mut Report<W>) -> Result<ProfileCheck, AuditError>
where
    S: AuditStore + ?Sized,
    W: Write,
{
    let counts = CountCheck {
        users: store.count_all(USERS).await?,
        others: store.count_all(PROFILES).await?,
    };

    if counts.matches() {
        report.line(format!("   ✅ Users and profiles match: {} each", counts.users));
        return Ok(ProfileCheck { counts, orphans: Vec::new() });
    }

    report.line(format!(
        "   ⚠️  Mismatch: {} users but {} profiles",
        counts.users, counts.others
    ));

    let users = store.user_summaries().await?;
    let profiles = store.profile_refs().await?;
    let orphans = find_orphans(&users, &profiles);

    if !orphans.is_empty() {
        report.line(format!("      Found {} users without profiles:", orphans.len()));
        for user in &orphans {
            report.line(format!(
                "         - {} ({})",
                user.display_email(),
                user.display_name()
            ));
        }
    }

    Ok(ProfileCheck { counts, orphans })
}

/// Compares users vs subscriptions by count only
pub async fn check_subscriptions<S, W>(store: &S, report: &mut Report<W>) -> Result<CountCheck, AuditError>
where
    S: AuditStore + ?Sized,
    W: Write,
{
    let counts = CountCheck {
        users: store.count_all(USERS).await?,
        others: store.count_all(SUBSCRIPTIONS).await?,
    };

    if counts.matches() {
        report.line(format!("   ✅ Users and subscriptions match: {} each", counts.users));
    } else {
        report.line(format!(
            "   ⚠️  Mismatch: {} users but {} subscriptions",
            counts.users, counts.others
        ));
    }

    Ok(counts)
}
