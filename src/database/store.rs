use crate::models::{IndexSpec, ProfileRef, SampleUser, UserSummary};
use crate::utils::AuditError;
use async_trait::async_trait;

/// Read-only queries (plus index declaration) the audit runs against the database.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Connectivity check; nothing else runs when this fails
    async fn ping(&self) -> Result<(), AuditError>;

    async fn collection_names(&self) -> Result<Vec<String>, AuditError>;

    async fn count_all(&self, collection: &str) -> Result<u64, AuditError>;

    /// Users whose `password_hash` is missing, null or empty
    async fn count_users_without_password(&self) -> Result<u64, AuditError>;

    async fn count_verified_users(&self) -> Result<u64, AuditError>;

    async fn count_users_with_status(&self, status: &str) -> Result<u64, AuditError>;

    /// Profiles whose `photos` array has at least one entry
    async fn count_profiles_with_photos(&self) -> Result<u64, AuditError>;

    /// Users with `created_at >= since` (ISO-8601 string comparison)
    async fn count_users_created_since(&self, since: &str) -> Result<u64, AuditError>;

    async fn user_summaries(&self) -> Result<Vec<UserSummary>, AuditError>;

    async fn profile_refs(&self) -> Result<Vec<ProfileRef>, AuditError>;

    async fn sample_user(&self) -> Result<Option<SampleUser>, AuditError>;

    /// Idempotent: an identical existing index is a no-op
    async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AuditError>;

    /// Releases the connection; called once on every exit path
    async fn close(&self);
}
