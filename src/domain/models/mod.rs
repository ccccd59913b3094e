pub mod serviceman;
pub mod subscription;
pub mod user;
