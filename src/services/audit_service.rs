// ==================== CONSISTENCY AUDIT ====================
// Executa as cinco etapas em sequência e imprime o resumo final.
// Cada etapa captura os próprios erros: uma falha não impede as seguintes.

use crate::database::AuditStore;
use crate::services::{collection_service, index_service, integrity_service, login_check_service, stats_service};
use crate::utils::{AuditError, Report};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequired {
    MissingPasswordHash(u64),
    ProfileMismatch { users: u64, profiles: u64 },
    SubscriptionMismatch { users: u64, subscriptions: u64 },
    IndexGroupFailed(&'static str),
    StepFailed(&'static str),
}

impl fmt::Display for ActionRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionRequired::MissingPasswordHash(n) => {
                write!(f, "Some users missing password_hash ({})", n)
            }
            ActionRequired::ProfileMismatch { users, profiles } => write!(
                f,
                "Users and profiles count mismatch ({} vs {})",
                users, profiles
            ),
            ActionRequired::SubscriptionMismatch { users, subscriptions } => write!(
                f,
                "Users and subscriptions count mismatch ({} vs {})",
                users, subscriptions
            ),
            ActionRequired::IndexGroupFailed(collection) => {
                write!(f, "Indexes on '{}' could not be ensured", collection)
            }
            ActionRequired::StepFailed(step) => write!(f, "{} did not complete", step),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditSummary {
    pub collections_found: Option<usize>,
    pub indexes_ensured: usize,
    pub total_users: Option<u64>,
    pub actions: Vec<ActionRequired>,
}

impl AuditSummary {
    pub fn is_healthy(&self) -> bool {
        self.actions.is_empty()
    }
}

#[derive(Debug)]
pub enum AuditOutcome {
    ConnectionFailed(AuditError),
    Completed(AuditSummary),
}

/// Runs the whole audit. The store is closed before returning on every path.
pub async fn run_audit<S, W>(store: &S, report: &mut Report<W>, now: DateTime<Utc>) -> AuditOutcome
where
    S: AuditStore + ?Sized,
    W: Write,
{
    if let Err(e) = store.ping().await {
        log::error!("❌ MongoDB ping failed: {}", e);
        report.line(format!("❌ Connection failed: {}", e));
        report.flush();
        store.close().await;
        return AuditOutcome::ConnectionFailed(e);
    }
    report.line("✅ Connected successfully!");
    report.blank();

    let mut summary = AuditSummary::default();

    // 1. Collections
    match collection_service::check_collections(store, report).await {
        Ok(found) => summary.collections_found = Some(found.len()),
        Err(e) => step_failed(report, &mut summary, "Collection check", e),
    }

    // 2. Índices (erros já tratados por grupo)
    let indexes = index_service::ensure_indexes(store, report).await;
    summary.indexes_ensured = indexes.ensured;
    summary
        .actions
        .extend(indexes.failed_groups.into_iter().map(ActionRequired::IndexGroupFailed));

    // 3. Integridade: três consultas independentes
    report.line("🔍 Step 3: Data integrity checks...");
    match integrity_service::check_password_hashes(store, report).await {
        Ok(0) => {}
        Ok(missing) => summary.actions.push(ActionRequired::MissingPasswordHash(missing)),
        Err(e) => step_failed(report, &mut summary, "Password hash check", e),
    }
    match integrity_service::check_profiles(store, report).await {
        Ok(check) if !check.counts.matches() => {
            log::debug!("{} user(s) without profile", check.orphans.len());
            summary.actions.push(ActionRequired::ProfileMismatch {
                users: check.counts.users,
                profiles: check.counts.others,
            });
        }
        Ok(_) => {}
        Err(e) => step_failed(report, &mut summary, "Profile check", e),
    }
    match integrity_service::check_subscriptions(store, report).await {
        Ok(counts) if !counts.matches() => summary.actions.push(ActionRequired::SubscriptionMismatch {
            users: counts.users,
            subscriptions: counts.others,
        }),
        Ok(_) => {}
        Err(e) => step_failed(report, &mut summary, "Subscription check", e),
    }
    report.blank();

    // 4. Estatísticas
    match stats_service::collect_stats(store, report, now).await {
        Ok(stats) => summary.total_users = Some(stats.total_users),
        Err(e) => step_failed(report, &mut summary, "Statistics", e),
    }

    // 5. Login (apenas informativo)
    if let Err(e) = login_check_service::check_sample_user(store, report).await {
        step_failed(report, &mut summary, "Login check", e);
    }

    print_summary(report, &summary);
    report.flush();
    store.close().await;

    log::info!(
        "Audit finished: {} action(s) required",
        summary.actions.len()
    );
    AuditOutcome::Completed(summary)
}

fn step_failed<W: Write>(
    report: &mut Report<W>,
    summary: &mut AuditSummary,
    step: &'static str,
    error: AuditError,
) {
    log::error!("❌ {} failed: {}", step, error);
    report.line(format!("   ❌ {} failed: {}", step, error));
    report.blank();
    summary.actions.push(ActionRequired::StepFailed(step));
}

fn print_summary<W: Write>(report: &mut Report<W>, summary: &AuditSummary) {
    report.banner("📋 SUMMARY");

    let unknown = || "unknown".to_string();
    report.line("✅ Database Connection: OK");
    report.line(format!(
        "✅ Collections: {} found",
        summary.collections_found.map(|n| n.to_string()).unwrap_or_else(unknown)
    ));
    report.line(format!("✅ Indexes: Created/Verified ({})", summary.indexes_ensured));
    report.line(format!(
        "✅ Total Users: {}",
        summary.total_users.map(|n| n.to_string()).unwrap_or_else(unknown)
    ));
    report.blank();

    for action in &summary.actions {
        report.line(format!("⚠️  ACTION REQUIRED: {}", action));
    }
    if summary.is_healthy() {
        report.line("🟢 Overall status: HEALTHY");
    } else {
        report.line("🔴 Overall status: NEEDS ATTENTION");
    }

    report.blank();
    report.line("✅ Database optimization complete!");
    report.blank();
}
