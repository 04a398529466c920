pub mod filters;
#[cfg(test)]
pub mod memory;
pub mod store;

pub use store::AuditStore;

use crate::models::{IndexSpec, ProfileRef, SampleUser, UserSummary, PROFILES, USERS};
use crate::utils::{AuditError, Config};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Builds the client without touching the network; `ping` does the first round-trip.
    pub async fn connect(config: &Config) -> Result<Self, AuditError> {
        let mut client_options = ClientOptions::parse(&config.mongo_url)
            .await
            .map_err(|e| AuditError::Connection(e.to_string()))?;

        // Execução única e sequencial: pool pequeno basta
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(2);
        client_options.connect_timeout = Some(config.timeout);
        client_options.server_selection_timeout = Some(config.timeout);

        let client = Client::with_options(client_options)
            .map_err(|e| AuditError::Connection(e.to_string()))?;
        let db = client.database(&config.db_name);

        log::info!("📡 MongoDB client ready for database '{}'", config.db_name);

        Ok(Self { client, db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, AuditError> {
        log::debug!("count_documents {} {}", collection, filter);
        let count = self
            .collection::<Document>(collection)
            .count_documents(filter)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl AuditStore for MongoDB {
    async fn ping(&self) -> Result<(), AuditError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AuditError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn collection_names(&self) -> Result<Vec<String>, AuditError> {
        Ok(self.db.list_collection_names().await?)
    }

    async fn count_all(&self, collection: &str) -> Result<u64, AuditError> {
        self.count(collection, doc! {}).await
    }

    async fn count_users_without_password(&self) -> Result<u64, AuditError> {
        self.count(USERS, filters::missing_password_hash()).await
    }

    async fn count_verified_users(&self) -> Result<u64, AuditError> {
        self.count(USERS, filters::verified_users()).await
    }

    async fn count_users_with_status(&self, status: &str) -> Result<u64, AuditError> {
        self.count(USERS, filters::subscription_status(status)).await
    }

    async fn count_profiles_with_photos(&self) -> Result<u64, AuditError> {
        self.count(PROFILES, filters::profiles_with_photos()).await
    }

    async fn count_users_created_since(&self, since: &str) -> Result<u64, AuditError> {
        self.count(USERS, filters::created_since(since)).await
    }

    async fn user_summaries(&self) -> Result<Vec<UserSummary>, AuditError> {
        let cursor = self
            .collection::<UserSummary>(USERS)
            .find(doc! {})
            .projection(filters::user_summary_projection())
            .await?;
        let users: Vec<UserSummary> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn profile_refs(&self) -> Result<Vec<ProfileRef>, AuditError> {
        let cursor = self
            .collection::<ProfileRef>(PROFILES)
            .find(doc! {})
            .projection(filters::profile_ref_projection())
            .await?;
        let profiles: Vec<ProfileRef> = cursor.try_collect().await?;
        Ok(profiles)
    }

    async fn sample_user(&self) -> Result<Option<SampleUser>, AuditError> {
        let user = self
            .collection::<SampleUser>(USERS)
            .find_one(doc! {})
            .projection(filters::sample_user_projection())
            .await?;
        Ok(user)
    }

    async fn ensure_index(&self, collection: &str, index: &IndexSpec) -> Result<(), AuditError> {
        // `unique: false` explícito conflita com índices criados sem a opção
        let options = index
            .unique
            .then(|| IndexOptions::builder().unique(true).build());

        let model = IndexModel::builder()
            .keys(index.key_document())
            .options(options)
            .build();

        self.collection::<Document>(collection)
            .create_index(model)
            .await?;
        log::debug!("Index ensured: {}({})", collection, index.name());
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        log::debug!("MongoDB client shut down");
    }
}
