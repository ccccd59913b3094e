use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateServicemanRequest, UpdateServicemanRequest};
use crate::domain::models::serviceman::{ServiceMan, ServicemanPatch};
use crate::domain::ports::ExpandField;
use crate::error::AppError;
use crate::state::AppState;

fn parse_id(raw: &str, message: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::Validation(message.to_string()))
}

fn parse_id_list(raw: &[String], message: &str) -> Result<Vec<ObjectId>, AppError> {
    raw.iter().map(|id| parse_id(id, message)).collect()
}

pub async fn create_serviceman(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateServicemanRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = parse_id(&payload.user, "Invalid user or provider ID")?;
    let provider = parse_id(&payload.provider, "Invalid user or provider ID")?;
    let skills = parse_id_list(
        payload.skills.as_deref().unwrap_or_default(),
        "Invalid skill IDs provided",
    )?;

    let serviceman = ServiceMan::new(
        user,
        provider,
        payload.name,
        payload.phone,
        skills,
        payload.status,
        payload.location,
    );

    let created = state.serviceman_repo.create(&serviceman).await?;
    info!("Created serviceman: {:?}", created.id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "ServiceMan created successfully",
            "serviceMan": created
        })),
    ))
}

pub async fn get_serviceman(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Invalid serviceman ID")?;

    let view = state
        .serviceman_repo
        .find_expanded(id, &ExpandField::ALL)
        .await?
        .ok_or(AppError::NotFound("ServiceMan not found".into()))?;

    Ok(Json(view))
}

pub async fn update_serviceman(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateServicemanRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Invalid serviceman ID")?;

    let patch = ServicemanPatch {
        user: payload
            .user
            .as_deref()
            .map(|raw| parse_id(raw, "Invalid user ID"))
            .transpose()?,
        provider: payload
            .provider
            .as_deref()
            .map(|raw| parse_id(raw, "Invalid provider ID"))
            .transpose()?,
        name: payload.name,
        phone: payload.phone,
        skills: payload
            .skills
            .as_deref()
            .map(|raw| parse_id_list(raw, "Invalid skill IDs provided"))
            .transpose()?,
        status: payload.status,
        location: payload.location,
    };

    let updated = state
        .serviceman_repo
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound("ServiceMan not found".into()))?;

    info!("Updated serviceman: {}", id);

    Ok(Json(serde_json::json!({
        "message": "ServiceMan updated successfully",
        "serviceMan": updated
    })))
}

pub async fn delete_serviceman(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Invalid serviceman ID")?;

    if !state.serviceman_repo.delete(id).await? {
        return Err(AppError::NotFound("ServiceMan not found".into()));
    }

    info!("Deleted serviceman: {}", id);

    Ok(Json(serde_json::json!({
        "message": "ServiceMan deleted successfully"
    })))
}
