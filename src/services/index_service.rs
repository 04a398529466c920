use crate::database::AuditStore;
use crate::models::{required_index_groups, IndexGroup};
use crate::utils::Report;
use std::io::Write;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IndexOutcome {
    pub ensured: usize,
    /// Collections whose group stopped on an error
    pub failed_groups: Vec<&'static str>,
}

/// Step 2: declares every required index. Errors never escape: a failing
/// group is reported and the remaining groups still run.
pub async fn ensure_indexes<S, W>(store: &S, report: &mut Report<W>) -> IndexOutcome
where
    S: AuditStore + ?Sized,
    W: Write,
{
    report.line("📇 Step 2: Creating/Verifying indexes...");
    let mut outcome = IndexOutcome::default();

    for group in required_index_groups() {
        report.line(format!("   {}", group.title));
        match ensure_group(store, &group, report).await {
            Ok(count) => outcome.ensured += count,
            Err(ensured_before_failure) => {
                outcome.ensured += ensured_before_failure;
                outcome.failed_groups.push(group.collection);
            }
        }
    }
    report.blank();

    outcome
}

/// Stops at the first failure; returns how many indexes were ensured either way.
async fn ensure_group<S, W>(
    store: &S,
    group: &IndexGroup,
    report: &mut Report<W>,
) -> Result<usize, usize>
where
    S: AuditStore + ?Sized,
    W: Write,
{
    for (ensured, index) in group.indexes.iter().enumerate() {
        if let Err(e) = store.ensure_index(group.collection, index).await {
            log::warn!("Index group '{}' stopped at {}: {}", group.collection, index.name(), e);
            report.line(format!(
                "      ⚠️  Error creating {} indexes: {}",
                group.collection, e
            ));
            return Err(ensured);
        }
        report.line(format!("      ✅ {}", index.describe()));
    }
    Ok(group.indexes.len())
}
