use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted movie, owned by exactly one collection
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    /// External identifier, unique across every collection
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    /// Comma-separated genre names
    pub genres: Option<String>,
    pub collection_id: i64,
}

/// A validated movie record ready for ingestion.
///
/// Deserialized from caller or catalog JSON; unknown fields are ignored so
/// upstream records can be passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub genres: Option<String>,
}

impl NewMovie {
    /// Parses one raw record, returning a description of what is wrong with it
    pub fn from_record(record: &serde_json::Value) -> Result<Self, String> {
        serde_json::from_value(record.clone()).map_err(|e| e.to_string())
    }
}
