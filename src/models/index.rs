use super::collections::{PROFILES, SUBSCRIPTIONS, USERS, USER_SETTINGS};
use mongodb::bson::{Bson, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Ascending,
    Sphere2d,
}

impl IndexKind {
    fn key_value(self) -> Bson {
        match self {
            IndexKind::Ascending => Bson::Int32(1),
            IndexKind::Sphere2d => Bson::String("2dsphere".to_string()),
        }
    }

    fn name_suffix(self) -> &'static str {
        match self {
            IndexKind::Ascending => "1",
            IndexKind::Sphere2d => "2dsphere",
        }
    }
}

/// Definição declarativa de um índice
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpec {
    pub keys: Vec<(&'static str, IndexKind)>,
    pub unique: bool,
    /// Short description for compound indexes
    pub label: Option<&'static str>,
}

impl IndexSpec {
    pub fn single(field: &'static str) -> Self {
        Self { keys: vec![(field, IndexKind::Ascending)], unique: false, label: None }
    }

    pub fn unique(field: &'static str) -> Self {
        Self { keys: vec![(field, IndexKind::Ascending)], unique: true, label: None }
    }

    pub fn compound(label: &'static str, keys: Vec<(&'static str, IndexKind)>) -> Self {
        Self { keys, unique: false, label: Some(label) }
    }

    /// Key document in declaration order, e.g. `{ gender: 1, "location.coordinates": "2dsphere" }`
    pub fn key_document(&self) -> Document {
        let mut keys = Document::new();
        for (field, kind) in &self.keys {
            keys.insert(*field, kind.key_value());
        }
        keys
    }

    /// Nome padrão que o servidor atribui (`email_1`, `location.coordinates_2dsphere`)
    pub fn name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, kind)| format!("{}_{}", field, kind.name_suffix()))
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn describe(&self) -> String {
        match (self.label, self.unique) {
            (Some(label), _) => format!("Compound index for {}", label),
            (None, true) => format!("Unique index on '{}'", self.field_list()),
            (None, false) => format!("Index on '{}'", self.field_list()),
        }
    }

    fn field_list(&self) -> String {
        self.keys.iter().map(|(field, _)| *field).collect::<Vec<_>>().join(", ")
    }
}

/// Indexes declared together on one collection; a failure skips the rest of the group
#[derive(Debug, Clone)]
pub struct IndexGroup {
    pub collection: &'static str,
    pub title: &'static str,
    pub indexes: Vec<IndexSpec>,
}

pub fn required_index_groups() -> Vec<IndexGroup> {
    vec![
        IndexGroup {
            collection: USERS,
            title: "👤 Users collection:",
            indexes: vec![
                IndexSpec::unique("email"),
                IndexSpec::single("id"),
                IndexSpec::single("phone_number"),
                IndexSpec::single("subscription_status"),
                IndexSpec::single("verified"),
            ],
        },
        IndexGroup {
            collection: PROFILES,
            title: "📝 Profiles collection:",
            indexes: vec![
                IndexSpec::unique("user_id"),
                IndexSpec::single("id"),
                IndexSpec::compound(
                    "matching (gender, looking_for, location)",
                    vec![
                        ("gender", IndexKind::Ascending),
                        ("looking_for", IndexKind::Ascending),
                        ("location.coordinates", IndexKind::Sphere2d),
                    ],
                ),
            ],
        },
        IndexGroup {
            collection: SUBSCRIPTIONS,
            title: "💳 Subscriptions collection:",
            indexes: vec![
                IndexSpec::unique("user_id"),
                IndexSpec::single("status"),
                IndexSpec::single("next_payment_date"),
            ],
        },
        IndexGroup {
            collection: USER_SETTINGS,
            title: "⚙️  User Settings collection:",
            indexes: vec![IndexSpec::unique("user_id")],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_compound_key_document_keeps_order() {
        let groups = required_index_groups();
        let profiles = groups.iter().find(|g| g.collection == PROFILES).unwrap();
        let compound = profiles.indexes.iter().find(|i| i.label.is_some()).unwrap();

        assert_eq!(
            compound.key_document(),
            doc! { "gender": 1, "looking_for": 1, "location.coordinates": "2dsphere" }
        );
        assert_eq!(
            compound.name(),
            "gender_1_looking_for_1_location.coordinates_2dsphere"
        );
        assert!(!compound.unique);
    }

    #[test]
    fn test_every_collection_has_unique_key() {
        for group in required_index_groups() {
            let first = &group.indexes[0];
            assert!(first.unique, "{} should start with its unique key", group.collection);
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(IndexSpec::unique("email").describe(), "Unique index on 'email'");
        assert_eq!(IndexSpec::single("verified").describe(), "Index on 'verified'");
        assert_eq!(IndexSpec::single("verified").name(), "verified_1");
    }
}
