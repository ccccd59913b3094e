use crate::domain::models::serviceman::{Location, ServicemanStatus};
use serde::Deserialize;

/// Identifier fields arrive as raw strings and are syntax-checked in the
/// handler before anything touches the persistence layer.
#[derive(Deserialize)]
pub struct CreateServicemanRequest {
    pub user: String,
    pub provider: String,
    pub name: String,
    pub phone: String,
    pub skills: Option<Vec<String>>,
    pub status: Option<ServicemanStatus>,
    pub location: Option<Location>,
}

#[derive(Deserialize, Default)]
pub struct UpdateServicemanRequest {
    pub user: Option<String>,
    pub provider: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    pub status: Option<ServicemanStatus>,
    pub location: Option<Location>,
}
