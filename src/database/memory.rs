// In-memory AuditStore for tests: same query semantics as the filters in `filters.rs`
use super::AuditStore;
use crate::models::{IndexSpec, ProfileRef, SampleUser, UserSummary, PROFILES, USERS};
use crate::utils::AuditError;
use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, Vec<Document>>,
    /// collection -> index name -> unique
    indexes: Mutex<HashMap<String, BTreeMap<String, bool>>>,
    reachable: bool,
    failing: Vec<&'static str>,
    pub queries: AtomicUsize,
    pub closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { reachable: true, ..Default::default() }
    }

    pub fn unreachable() -> Self {
        Self { reachable: false, ..Default::default() }
    }

    pub fn with_documents(mut self, collection: &str, docs: Vec<Document>) -> Self {
        self.collections.entry(collection.to_string()).or_default().extend(docs);
        self
    }

    pub fn with_index(self, collection: &str, name: &str, unique: bool) -> Self {
        self.indexes
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .insert(name.to_string(), unique);
        self
    }

    /// Makes the named query return a database error
    pub fn failing_on(mut self, query: &'static str) -> Self {
        self.failing.push(query);
        self
    }

    pub fn index_names(&self, collection: &str) -> Vec<String> {
        self.indexes
            .lock()
            .unwrap()
            .get(collection)
            .map(|names| names.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn docs(&self, collection: &str) -> &[Document] {
        self.collections.get(collection).map(Vec::as_slice).unwrap_or(&[])
    }

    fn track(&self, query: &'static str) -> Result<(), AuditError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&query) {
            return Err(AuditError::Database(format!("{} failed", query)));
        }
        Ok(())
    }

    /// First value repeated across documents for a single-field index.
    /// Only documents holding the field are considered.
    fn duplicate_value(&self, collection: &str, index: &IndexSpec) -> Option<Bson> {
        let [(field, _)] = index.keys.as_slice() else {
            return None;
        };
        let mut values: Vec<&Bson> = Vec::new();
        for doc in self.docs(collection) {
            let Some(value) = doc.get(*field) else {
                continue;
            };
            if values.contains(&value) {
                return Some(value.clone());
            }
            values.push(value);
        }
        None
    }

    fn count_where<F>(&self, collection: &str, predicate: F) -> u64
    where
        F: Fn(&Document) -> bool,
    {
        self.docs(collection).iter().filter(|d| predicate(d)).count() as u64
    }
}

fn decode<T: serde::de::DeserializeOwned>(doc: &Document) -> Result<T, AuditError> {
    bson::from_document(doc.clone()).map_err(|e| AuditError::Database(e.to_string()))
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn ping(&self) -> Result<(), AuditError> {
        if self.reachable {
            Ok(())
        } else {
            Err(AuditError::Connection("Server selection timeout: No available servers".into()))
        }
    }

    async fn collection_names(&self) -> Result<Vec<String>, AuditError> {
        self.track("collection_names")?;
        Ok(self.collections.keys().cloned().collect())
    }

    async fn count_all(&self, collection: &str) -> Result<u64, AuditError> {
        self.track("count_all")?;
        Ok(self.docs(collection).len() as u64)
    }

    async fn count_users_without_password(&self) -> Result<u64, AuditError> {
        self.track("count_users_without_password")?;
        Ok(self.count_where(USERS, |d| match d.get("password_hash") {
            None | Some(Bson::Null) => true,
            Some(Bson::String(s)) => s.is_empty(),
            Some(_) => false,
        }))
    }

    async fn count_verified_users(&self) -> Result<u64, AuditError> {
        self.track("count_verified_users")?;
        Ok(self.count_where(USERS, |d| matches!(d.get_bool("verified"), Ok(true))))
    }

    async fn count_users_with_status(&self, status: &str) -> Result<u64, AuditError> {
        self.track("count_users_with_status")?;
        Ok(self.count_where(USERS, |d| {
            d.get_str("subscription_status").map(|s| s == status).unwrap_or(false)
        }))
    }

    async fn count_profiles_with_photos(&self) -> Result<u64, AuditError> {
        self.track("count_profiles_with_photos")?;
        Ok(self.count_where(PROFILES, |d| {
            d.get_array("photos").map(|p| !p.is_empty()).unwrap_or(false)
        }))
    }

    async fn count_users_created_since(&self, since: &str) -> Result<u64, AuditError> {
        self.track("count_users_created_since")?;
        Ok(self.count_where(USERS, |d| {
            d.get_str("created_at").map(|c| c >= since).unwrap_or(false)
        }))
    }

    async fn user_summaries(&self) -> Result<Vec<UserSummary>, AuditError> {
        self.track("user_summaries")?;
        self.docs(USERS).iter().map(decode::<UserSummary>).collect()
    }

    async fn profile_refs(&self) -> Result<Vec<ProfileRef>, AuditError> {
        self.track("profile_refs")?;
        self.docs(PROFILES).iter().map(decode::<ProfileRef>).collect()
    }

    async fn sample_user(&self) -> Result<Option<SampleUser>, AuditError> {
        self.track("sample_user")?;
        self.docs(USERS).first().map(decode::<SampleUser>).transpose()
    }

    async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AuditError> {
        self.track("ensure_index")?;
        let mut indexes = self.indexes.lock().unwrap();
        let existing = indexes.entry(collection.to_string()).or_default();
        let name = index.name();

        match existing.get(&name) {
            Some(&unique) if unique == index.unique => Ok(()),
            Some(_) => Err(AuditError::from_code(
                85,
                format!("Index with name: {} already exists with different options", name),
            )),
            None => {
                if index.unique {
                    if let Some(value) = self.duplicate_value(collection, index) {
                        return Err(AuditError::from_code(
                            11000,
                            format!(
                                "E11000 duplicate key error collection: {} index: {} dup key: {}",
                                collection, name, value
                            ),
                        ));
                    }
                }
                existing.insert(name, index.unique);
                Ok(())
            }
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
