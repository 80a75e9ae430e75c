//! Actor endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Actor;
use crate::infrastructure::actor::{CreateActorRequest, UpdateActorRequest};

/// Request to create a new actor
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActorApiRequest {
    pub name: String,
    pub birth: String,
}

/// Request to change an actor; absent fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActorApiRequest {
    pub birth: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// Actor snapshot for transport
#[derive(Debug, Clone, Serialize)]
pub struct ActorResponse {
    pub name: String,
    pub birth: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl From<&Actor> for ActorResponse {
    fn from(actor: &Actor) -> Self {
        Self {
            name: actor.name().to_string(),
            birth: actor.birth().to_rfc3339(),
            bio: actor.bio().map(String::from),
            image: actor.image().map(String::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListActorsResponse {
    pub actors: Vec<ActorResponse>,
    pub total: usize,
}

/// Parse a birth date given either as RFC 3339 or as a plain `YYYY-MM-DD`
/// date (interpreted as midnight UTC).
pub(super) fn parse_birth(value: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            ApiError::bad_request(format!(
                "Invalid birth date '{value}': expected RFC 3339 or YYYY-MM-DD"
            ))
        })
}

/// POST /v1/actors
pub async fn create_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Json(request): Json<CreateActorApiRequest>,
) -> Result<(StatusCode, Json<ActorResponse>), ApiError> {
    debug!(name = %request.name, "Creating actor");

    let birth = parse_birth(&request.birth)?;

    let actor = state
        .actor_service
        .create(CreateActorRequest {
            name: request.name,
            birth,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(ActorResponse::from(&actor))))
}

/// GET /v1/actors
pub async fn list_actors(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<ListActorsResponse>, ApiError> {
    let actors = state.actor_service.list().await.map_err(ApiError::from)?;

    let responses: Vec<ActorResponse> = actors.iter().map(ActorResponse::from).collect();
    let total = responses.len();

    Ok(Json(ListActorsResponse {
        actors: responses,
        total,
    }))
}

/// GET /v1/actors/{name}
pub async fn get_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
) -> Result<Json<ActorResponse>, ApiError> {
    let actor = state.actor_service.show(&name).await.map_err(ApiError::from)?;

    Ok(Json(ActorResponse::from(&actor)))
}

/// PUT /v1/actors/{name}
pub async fn update_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
    Json(request): Json<UpdateActorApiRequest>,
) -> Result<Json<ActorResponse>, ApiError> {
    debug!(name = %name, "Changing actor");

    let birth = match request.birth.as_deref() {
        Some(value) => Some(parse_birth(value)?),
        None => None,
    };

    let actor = state
        .actor_service
        .change(
            &name,
            UpdateActorRequest {
                birth,
                bio: request.bio,
                image: request.image,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ActorResponse::from(&actor)))
}

/// DELETE /v1/actors/{name}
pub async fn delete_actor(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(name = %name, "Deleting actor");

    state.actor_service.remove(&name).await.map_err(ApiError::from)?;

    Ok(Json(serde_json::json!({
        "deleted": true,
        "name": name
    })))
}
