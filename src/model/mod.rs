//! Wire models of the catalog API: one submodule per resource family, plus the listing
//! envelopes and the reference type used for related objects.

pub mod movie;
pub mod page;
pub mod person;
pub mod reference;
pub mod review;
pub mod user;

pub use movie::*;
pub use page::*;
pub use person::*;
pub use reference::*;
pub use review::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// A related object as embedded by the backend: a bare primary key or a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related {
    Id(u64),
    Object {
        id: u64,
        #[serde(flatten)]
        fields: serde_json::Map<String, serde_json::Value>,
    },
}

impl Related {
    pub fn id(&self) -> u64 {
        match self {
            Related::Id(id) | Related::Object { id, .. } => *id,
        }
    }

    /// A human label: the first of `title`, `full_name`, `username`, `name`, else the id.
    pub fn label(&self) -> String {
        if let Related::Object { fields, .. } = self {
            for key in ["title", "full_name", "username", "name"] {
                if let Some(serde_json::Value::String(s)) = fields.get(key) {
                    return s.clone();
                }
            }
        }
        format!("#{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_related_accepts_id_or_object() {
        let bare: Related = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(bare.id(), 4);
        assert_eq!(bare.label(), "#4");

        let nested: Related =
            serde_json::from_value(json!({"id": 9, "full_name": "Ingrid Bergman"})).unwrap();
        assert_eq!(nested.id(), 9);
        assert_eq!(nested.label(), "Ingrid Bergman");
    }

    #[test]
    fn test_movie_summary_from_listing_row() {
        let row: MovieSummary = serde_json::from_value(json!({
            "id": 1,
            "type": "Фильм",
            "title": "Solaris",
            "poster": null,
            "rate": 8.1,
            "release_year": 1972
        }))
        .unwrap();
        assert_eq!(row.kind.as_deref(), Some("Фильм"));
        assert_eq!(row.release_year, Some(1972));
    }

    #[test]
    fn test_update_payload_skips_unset_fields() {
        let update = MovieUpdate {
            title: Some("Stalker".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"title": "Stalker"}));
    }
}
