use super::IdKey;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// Projection `{user_id}` of a profile
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProfileRef {
    #[serde(default)]
    pub user_id: Option<Bson>,
}

impl ProfileRef {
    pub fn id_key(&self) -> Option<IdKey> {
        self.user_id.as_ref().and_then(IdKey::from_bson)
    }
}
