use crate::domain::models::user::User;
use crate::domain::ports::UserRepository;
use crate::error::AppError;
use async_trait::async_trait;
use bson::doc;
use mongodb::{Collection, Database};

pub struct MongoUserRepo {
    collection: Collection<User>,
}

impl MongoUserRepo {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        self.collection.insert_one(user).await?;
        Ok(user.clone())
    }
}
