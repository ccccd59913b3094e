#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bson::{doc, oid::ObjectId, Document};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use marketplace_backend::{
    api::router::create_router,
    config::Config,
    domain::models::{
        serviceman::{ServiceMan, ServicemanPatch, ServicemanView},
        subscription::SubscriptionPlan,
        user::User,
    },
    domain::ports::{
        ExpandField, ServicemanRepository, SubscriptionRepository, UserRepository,
    },
    error::AppError,
    state::AppState,
};

pub fn test_config() -> Config {
    Config {
        database_url: "mongodb://localhost:27017".to_string(),
        database_name: "marketplace_test".to_string(),
        port: 0,
        super_admin_email: "admin@admin.com".to_string(),
        super_admin_password: Some("Password12$".to_string()),
    }
}

#[derive(Default)]
pub struct InMemoryServicemanRepo {
    pub servicemen: Mutex<HashMap<ObjectId, ServiceMan>>,
    pub users: Mutex<HashMap<ObjectId, Document>>,
    pub providers: Mutex<HashMap<ObjectId, Document>>,
    pub skills: Mutex<HashMap<ObjectId, Document>>,
}

impl InMemoryServicemanRepo {
    pub fn seed_user(&self, record: Document) -> ObjectId {
        let id = ObjectId::new();
        let mut record = record;
        record.insert("_id", id);
        self.users.lock().unwrap().insert(id, record);
        id
    }

    pub fn seed_provider(&self, record: Document) -> ObjectId {
        let id = ObjectId::new();
        let mut record = record;
        record.insert("_id", id);
        self.providers.lock().unwrap().insert(id, record);
        id
    }

    pub fn seed_skill(&self, record: Document) -> ObjectId {
        let id = ObjectId::new();
        let mut record = record;
        record.insert("_id", id);
        self.skills.lock().unwrap().insert(id, record);
        id
    }

    pub fn count(&self) -> usize {
        self.servicemen.lock().unwrap().len()
    }
}

#[async_trait]
impl ServicemanRepository for InMemoryServicemanRepo {
    async fn create(&self, serviceman: &ServiceMan) -> Result<ServiceMan, AppError> {
        let id = serviceman
            .id
            .ok_or_else(|| AppError::InternalWithMsg("serviceman without id".into()))?;
        self.servicemen.lock().unwrap().insert(id, serviceman.clone());
        Ok(serviceman.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<ServiceMan>, AppError> {
        Ok(self.servicemen.lock().unwrap().get(&id).cloned())
    }

    async fn find_expanded(
        &self,
        id: ObjectId,
        fields: &[ExpandField],
    ) -> Result<Option<ServicemanView>, AppError> {
        let entity = match self.servicemen.lock().unwrap().get(&id).cloned() {
            Some(entity) => entity,
            None => return Ok(None),
        };

        let mut user = None;
        let mut provider = None;
        let mut skills = Vec::new();

        for field in fields {
            match field {
                ExpandField::User => {
                    user = self.users.lock().unwrap().get(&entity.user).cloned();
                }
                ExpandField::Provider => {
                    provider = self.providers.lock().unwrap().get(&entity.provider).cloned();
                }
                ExpandField::Skills => {
                    let table = self.skills.lock().unwrap();
                    skills = entity
                        .skills
                        .iter()
                        .filter_map(|sid| table.get(sid).cloned())
                        .collect();
                }
            }
        }

        Ok(Some(ServicemanView {
            id,
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
        let mut table = self.servicemen.lock().unwrap();
        match table.get_mut(&id) {
            Some(entity) => {
                patch.apply_to(entity);
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        Ok(self.servicemen.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(user.clone())
    }
}

/// Serviceman store where every operation fails, for exercising the
/// generic 500 contract.
pub struct FailingServicemanRepo;

#[async_trait]
impl ServicemanRepository for FailingServicemanRepo {
    async fn create(&self, _serviceman: &ServiceMan) -> Result<ServiceMan, AppError> {
        Err(AppError::InternalWithMsg("simulated datastore outage".into()))
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<ServiceMan>, AppError> {
        Err(AppError::InternalWithMsg("simulated datastore outage".into()))
    }

    async fn find_expanded(
        &self,
        _id: ObjectId,
        _fields: &[ExpandField],
    ) -> Result<Option<ServicemanView>, AppError> {
        Err(AppError::InternalWithMsg("simulated datastore outage".into()))
    }

    async fn update(&self, _id: ObjectId, _patch: &ServicemanPatch) -> Result<Option<ServiceMan>, AppError> {
        Err(AppError::InternalWithMsg("simulated datastore outage".into()))
    }

    async fn delete(&self, _id: ObjectId) -> Result<bool, AppError> {
        Err(AppError::InternalWithMsg("simulated datastore outage".into()))
    }
}

/// Always fails, for exercising the seeder's non-fatal error policy.
pub struct FailingUserRepo;

#[async_trait]
impl UserRepository for FailingUserRepo {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
        Err(AppError::InternalWithMsg("simulated lookup failure".into()))
    }

    async fn create(&self, _user: &User) -> Result<User, AppError> {
        Err(AppError::InternalWithMsg("simulated insert failure".into()))
    }
}

#[derive(Default)]
pub struct InMemorySubscriptionRepo {
    pub plans: Mutex<Vec<SubscriptionPlan>>,
    pub sync_calls: AtomicUsize,
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepo {
    async fn sync_indexes(&self) -> Result<(), AppError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<SubscriptionPlan>, AppError> {
        Ok(self.plans.lock().unwrap().iter().find(|p| p.name == name).cloned())
    }

    async fn create(&self, plan: &SubscriptionPlan) -> Result<SubscriptionPlan, AppError> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(plan.clone())
    }
}

/// Fails lookups for one plan name so the others can still be seeded.
pub struct FlakySubscriptionRepo {
    pub inner: InMemorySubscriptionRepo,
    pub poisoned_name: String,
}

#[async_trait]
impl SubscriptionRepository for FlakySubscriptionRepo {
    async fn sync_indexes(&self) -> Result<(), AppError> {
        self.inner.sync_indexes().await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<SubscriptionPlan>, AppError> {
        if name == self.poisoned_name {
            return Err(AppError::InternalWithMsg("simulated lookup failure".into()));
        }
        self.inner.find_by_name(name).await
    }

    async fn create(&self, plan: &SubscriptionPlan) -> Result<SubscriptionPlan, AppError> {
        self.inner.create(plan).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub serviceman_repo: Arc<InMemoryServicemanRepo>,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        let serviceman_repo = Arc::new(InMemoryServicemanRepo::default());

        let state = Arc::new(AppState {
            config: test_config(),
            serviceman_repo: serviceman_repo.clone(),
        });

        let router = create_router(state.clone());

        Self {
            router,
            serviceman_repo,
            state,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }
}

/// Router whose serviceman store fails every operation.
pub fn failing_router() -> Router {
    let state = Arc::new(AppState {
        config: test_config(),
        serviceman_repo: Arc::new(FailingServicemanRepo),
    });
    create_router(state)
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Seeds a full set of referenced records and returns their ids as hex.
pub fn seed_references(repo: &InMemoryServicemanRepo) -> (String, String, String) {
    let user_id = repo.seed_user(doc! { "email": "tech@example.com", "role": "serviceman" });
    let provider_id = repo.seed_provider(doc! { "companyName": "FixIt GmbH" });
    let skill_id = repo.seed_skill(doc! { "name": "Plumbing" });
    (user_id.to_hex(), provider_id.to_hex(), skill_id.to_hex())
}
