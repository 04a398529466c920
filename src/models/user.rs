use super::IdKey;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// Projection `{id, name, email}` of a user, used to resolve orphans
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<Bson>,  // app-level identifier, not `_id`; any BSON type
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserSummary {
    pub fn id_key(&self) -> Option<IdKey> {
        self.id.as_ref().and_then(IdKey::from_bson)
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("<no email>")
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<no name>")
    }
}

/// One arbitrary user fetched for the login sanity check
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SampleUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
}
