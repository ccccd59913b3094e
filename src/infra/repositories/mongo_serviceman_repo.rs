use crate::domain::models::serviceman::{ServiceMan, ServicemanPatch, ServicemanView};
use crate::domain::ports::{ExpandField, ServicemanRepository};
use crate::error::AppError;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use std::collections::HashMap;

pub struct MongoServicemanRepo {
    db: Database,
    collection: Collection<ServiceMan>,
}

impl MongoServicemanRepo {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<ServiceMan>("servicemen");
        Self { db, collection }
    }

    async fn lookup_one(&self, collection: &str, id: ObjectId) -> Result<Option<Document>, AppError> {
        Ok(self
            .db
            .collection::<Document>(collection)
            .find_one(doc! { "_id": id })
            .await?)
    }

    /// Batched lookup that preserves the order of `ids`.
    async fn lookup_many(&self, collection: &str, ids: &[ObjectId]) -> Result<Vec<Document>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;

        let mut by_id: HashMap<ObjectId, Document> = HashMap::new();
        while let Some(record) = cursor.try_next().await? {
            if let Ok(oid) = record.get_object_id("_id") {
                by_id.insert(oid, record);
            }
        }

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

#[async_trait]
impl ServicemanRepository for MongoServicemanRepo {
    async fn create(&self, serviceman: &ServiceMan) -> Result<ServiceMan, AppError> {
        self.collection.insert_one(serviceman).await?;
        Ok(serviceman.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<ServiceMan>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_expanded(
        &self,
        id: ObjectId,
        fields: &[ExpandField],
    ) -> Result<Option<ServicemanView>, AppError> {
        let entity = match self.collection.find_one(doc! { "_id": id }).await? {
            Some(entity) => entity,
            None => return Ok(None),
        };

        let mut user = None;
        let mut provider = None;
        let mut skills = Vec::new();

        for field in fields {
            match field {
                ExpandField::User => user = self.lookup_one("users", entity.user).await?,
                ExpandField::Provider => provider = self.lookup_one("providers", entity.provider).await?,
                ExpandField::Skills => skills = self.lookup_many("skills", &entity.skills).await?,
            }
        }

        Ok(Some(ServicemanView {
            id: entity.id.unwrap_or(id),
            user,
            provider,
            name: entity.name,
            phone: entity.phone,
            skills,
            status: entity.status,
            location: entity.location,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }))
    }

    async fn update(&self, id: ObjectId, patch: &ServicemanPatch) -> Result<Option<ServiceMan>, AppError> {
        let set = patch.to_set_document()?;

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
