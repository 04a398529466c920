// Filtros e projeções usados nas consultas da auditoria
use mongodb::bson::{doc, Document};

pub fn missing_password_hash() -> Document {
    doc! {
        "$or": [
            { "password_hash": { "$exists": false } },
            { "password_hash": null },
            { "password_hash": "" },
        ]
    }
}

pub fn verified_users() -> Document {
    doc! { "verified": true }
}

pub fn subscription_status(status: &str) -> Document {
    doc! { "subscription_status": status }
}

pub fn profiles_with_photos() -> Document {
    doc! {
        "photos": { "$exists": true, "$ne": [], "$not": { "$size": 0 } }
    }
}

pub fn created_since(since: &str) -> Document {
    doc! { "created_at": { "$gte": since } }
}

pub fn user_summary_projection() -> Document {
    doc! { "_id": 0, "id": 1, "name": 1, "email": 1 }
}

pub fn profile_ref_projection() -> Document {
    doc! { "_id": 0, "user_id": 1 }
}

pub fn sample_user_projection() -> Document {
    doc! { "_id": 0, "email": 1, "password_hash": 1, "name": 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_missing_password_covers_three_cases() {
        let filter = missing_password_hash();
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);
        assert!(clauses.contains(&Bson::Document(doc! { "password_hash": null })));
        assert!(clauses.contains(&Bson::Document(doc! { "password_hash": "" })));
    }

    #[test]
    fn test_created_since_uses_gte() {
        let filter = created_since("2026-10-12T00:00:00.000000+00:00");
        let created = filter.get_document("created_at").unwrap();
        assert_eq!(
            created.get_str("$gte").unwrap(),
            "2026-10-12T00:00:00.000000+00:00"
        );
    }

    #[test]
    fn test_photos_filter_excludes_empty_arrays() {
        let filter = profiles_with_photos();
        let photos = filter.get_document("photos").unwrap();
        assert!(photos.get_bool("$exists").unwrap());
        assert_eq!(photos.get_array("$ne").unwrap().len(), 0);
        assert_eq!(
            photos.get_document("$not").unwrap(),
            &doc! { "$size": 0 }
        );
    }
}
