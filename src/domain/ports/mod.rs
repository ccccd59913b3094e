use crate::domain::models::{
    serviceman::{ServiceMan, ServicemanPatch, ServicemanView},
    subscription::SubscriptionPlan,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use bson::oid::ObjectId;

/// Reference fields of a serviceman that can be expanded on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandField {
    User,
    Provider,
    Skills,
}

impl ExpandField {
    pub const ALL: [ExpandField; 3] = [ExpandField::User, ExpandField::Provider, ExpandField::Skills];
}

#[async_trait]
pub trait ServicemanRepository: Send + Sync {
    async fn create(&self, serviceman: &ServiceMan) -> Result<ServiceMan, AppError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<ServiceMan>, AppError>;
    /// Explicit join: resolves the requested reference fields against their
    /// owning collections and returns the composed view.
    async fn find_expanded(
        &self,
        id: ObjectId,
        fields: &[ExpandField],
    ) -> Result<Option<ServicemanView>, AppError>;
    /// Applies only the fields present in the patch. Returns the post-update
    /// entity, or `None` when no entity exists for `id`.
    async fn update(&self, id: ObjectId, patch: &ServicemanPatch) -> Result<Option<ServiceMan>, AppError>;
    /// Returns `false` when no entity existed for `id`.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn create(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Ensures the declared indexes for the plan collection exist. Idempotent.
    async fn sync_indexes(&self) -> Result<(), AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<SubscriptionPlan>, AppError>;
    async fn create(&self, plan: &SubscriptionPlan) -> Result<SubscriptionPlan, AppError>;
}
