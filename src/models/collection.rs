use uuid::Uuid;

/// A named group of movies owned by one user
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Collection {
    /// Store-assigned sequence id, never exposed over HTTP
    pub id: i64,
    /// External identifier, immutable after creation
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: i64,
}

/// Fields needed to persist a new collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: i64,
}

impl NewCollection {
    /// Creates a new collection draft with a fresh external identifier
    pub fn new(title: String, description: String, owner_id: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title,
            description,
            owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collection_gets_unique_uuid() {
        let a = NewCollection::new("A".to_string(), "first".to_string(), 1);
        let b = NewCollection::new("A".to_string(), "first".to_string(), 1);
        assert_ne!(a.uuid, b.uuid);
        assert_eq!(a.owner_id, 1);
    }
}
