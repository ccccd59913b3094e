//! One-shot database bootstrap: connects, syncs indexes, then seeds the
//! super-admin account and the subscription catalog. Seeding is
//! insert-if-absent, so re-running is safe.

use tracing::{error, info};

use crate::config::Config;
use crate::domain::models::subscription::SubscriptionPlan;
use crate::domain::models::user::User;
use crate::domain::ports::{SubscriptionRepository, UserRepository};
use crate::error::AppError;
use crate::infra::factory;
use crate::infra::repositories::{
    mongo_subscription_repo::MongoSubscriptionRepo, mongo_user_repo::MongoUserRepo,
};

pub const BCRYPT_COST: u32 = 10;

/// Runs the whole setup sequence. An `Err` here means the connect phase
/// failed and the caller should exit non-zero; seeding errors are logged
/// per step and never bubble up.
pub async fn run_setup(config: &Config) -> Result<(), AppError> {
    let password = config
        .super_admin_password
        .clone()
        .ok_or_else(|| AppError::InternalWithMsg("SUPER_ADMIN_PASSWORD must be set for setup".into()))?;

    let db = factory::connect(config).await?;

    let user_repo = MongoUserRepo::new(db.clone());
    let subscription_repo = MongoSubscriptionRepo::new(db);

    // Index sync belongs to the connect phase; a failure here is treated
    // like a failed handshake.
    subscription_repo.sync_indexes().await?;

    ensure_super_admin(&user_repo, &config.super_admin_email, &password).await;
    ensure_subscription_catalog(&subscription_repo).await;

    info!("Database setup completed");
    Ok(())
}

pub async fn ensure_super_admin(repo: &dyn UserRepository, email: &str, password: &str) {
    match repo.find_by_email(email).await {
        Ok(Some(_)) => info!("Super admin already exists"),
        Ok(None) => {
            let hashed = match bcrypt::hash(password, BCRYPT_COST) {
                Ok(hash) => hash,
                Err(e) => {
                    error!("Error hashing super admin password: {}", e);
                    return;
                }
            };

            match repo.create(&User::super_admin(email.to_string(), hashed)).await {
                Ok(_) => info!("Super admin created successfully"),
                Err(e) => error!("Error creating super admin: {}", e),
            }
        }
        Err(e) => error!("Error creating super admin: {}", e),
    }
}

/// Each plan is checked and inserted independently; one plan failing does
/// not block the others.
pub async fn ensure_subscription_catalog(repo: &dyn SubscriptionRepository) {
    for plan in SubscriptionPlan::default_catalog() {
        match repo.find_by_name(&plan.name).await {
            Ok(Some(_)) => info!("Subscription plan '{}' already exists", plan.name),
            Ok(None) => match repo.create(&plan).await {
                Ok(_) => info!("Subscription plan '{}' created", plan.name),
                Err(e) => error!("Error creating subscription plan '{}': {}", plan.name, e),
            },
            Err(e) => error!("Error creating subscription plan '{}': {}", plan.name, e),
        }
    }
}
