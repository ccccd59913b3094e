use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServicemanStatus {
    #[default]
    Pending,
    Active,
    Suspended,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Core entity. Holds foreign keys only; see [`ServicemanView`] for the
/// reference-expanded read shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceMan {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: ObjectId,
    pub provider: ObjectId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<ObjectId>,
    #[serde(default)]
    pub status: ServicemanStatus,
    #[serde(default)]
    pub location: Location,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ServiceMan {
    pub fn new(
        user: ObjectId,
        provider: ObjectId,
        name: String,
        phone: String,
        skills: Vec<ObjectId>,
        status: Option<ServicemanStatus>,
        location: Option<Location>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Some(ObjectId::new()),
            user,
            provider,
            name,
            phone,
            skills,
            status: status.unwrap_or_default(),
            location: location.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Read view with `user`, `provider` and `skills` resolved to the full
/// referenced documents. The referenced collections belong to the wider
/// application, so their records stay untyped here.
#[derive(Debug, Serialize, Clone)]
pub struct ServicemanView {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: Option<Document>,
    pub provider: Option<Document>,
    pub name: String,
    pub phone: String,
    pub skills: Vec<Document>,
    pub status: ServicemanStatus,
    pub location: Location,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Partial update. Only fields carrying `Some` are applied.
#[derive(Debug, Clone, Default)]
pub struct ServicemanPatch {
    pub user: Option<ObjectId>,
    pub provider: Option<ObjectId>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<ObjectId>>,
    pub status: Option<ServicemanStatus>,
    pub location: Option<Location>,
}

impl ServicemanPatch {
    /// Flattens the supplied fields into a `$set` payload. `updatedAt` is
    /// always bumped.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        let mut set = doc! { "updatedAt": bson::to_bson(&Utc::now())? };
        if let Some(user) = self.user {
            set.insert("user", user);
        }
        if let Some(provider) = self.provider {
            set.insert("provider", provider);
        }
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(phone) = &self.phone {
            set.insert("phone", phone.as_str());
        }
        if let Some(skills) = &self.skills {
            set.insert("skills", bson::to_bson(skills)?);
        }
        if let Some(status) = &self.status {
            set.insert("status", bson::to_bson(status)?);
        }
        if let Some(location) = &self.location {
            set.insert("location", bson::to_bson(location)?);
        }
        Ok(set)
    }

    /// In-place merge used by in-memory implementations.
    pub fn apply_to(&self, entity: &mut ServiceMan) {
        if let Some(user) = self.user {
            entity.user = user;
        }
        if let Some(provider) = self.provider {
            entity.provider = provider;
        }
        if let Some(name) = &self.name {
            entity.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            entity.phone = phone.clone();
        }
        if let Some(skills) = &self.skills {
            entity.skills = skills.clone();
        }
        if let Some(status) = self.status {
            entity.status = status;
        }
        if let Some(location) = &self.location {
            entity.location = location.clone();
        }
        entity.updated_at = Utc::now();
    }
}
