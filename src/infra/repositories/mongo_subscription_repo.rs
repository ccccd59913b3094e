use crate::domain::models::subscription::SubscriptionPlan;
use crate::domain::ports::SubscriptionRepository;
use crate::error::AppError;
use async_trait::async_trait;
use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

pub struct MongoSubscriptionRepo {
    collection: Collection<SubscriptionPlan>,
}

impl MongoSubscriptionRepo {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<SubscriptionPlan>("subscriptions"),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for MongoSubscriptionRepo {
    async fn sync_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<SubscriptionPlan>, AppError> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    async fn create(&self, plan: &SubscriptionPlan) -> Result<SubscriptionPlan, AppError> {
        self.collection.insert_one(plan).await?;
        Ok(plan.clone())
    }
}
