use crate::database::AuditStore;
use crate::models::REQUIRED_COLLECTIONS;
use crate::utils::{AuditError, Report};
use std::io::Write;

/// Step 1: lists collections and counts the required ones.
/// Returns every collection name found in the database.
pub async fn check_collections<S, W>(
    store: &S,
    report: &mut Report<W>,
) -> Result<Vec<String>, AuditError>
where
    S: AuditStore + ?Sized,
    W: Write,
{
    report.line("📋 Step 1: Checking collections...");
    let collections = store.collection_names().await?;

    for name in REQUIRED_COLLECTIONS {
        if collections.iter().any(|c| c == name) {
            let count = store.count_all(name).await?;
            report.line(format!("   ✅ {}: {} documents", name, count));
        } else {
            report.line(format!(
                "   ⚠️  {}: Collection missing! Will be created on first use.",
                name
            ));
        }
    }
    report.blank();

    Ok(collections)
}
