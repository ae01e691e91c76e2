use serde::Serialize;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string, never serialized
    #[serde(skip)]
    pub password_hash: String,
}
