use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ROLE_SUPER_ADMIN: &str = "super_admin";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    /// Always a bcrypt hash, never the plaintext.
    pub password: String,
    pub role: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn super_admin(email: String, password_hash: String) -> Self {
        Self {
            id: Some(ObjectId::new()),
            email,
            password: password_hash,
            role: ROLE_SUPER_ADMIN.to_string(),
            created_at: Utc::now(),
        }
    }
}
