pub mod health;
pub mod serviceman;
