pub mod mongo_serviceman_repo;
pub mod mongo_subscription_repo;
pub mod mongo_user_repo;
