use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use places_types::User;
use places_types::api::{CreateUserRequest, PerimeterQuery, UserIdQuery};

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};

/// Fetch a user by id, with its address if it has one.
pub async fn get_user(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UserIdQuery>,
) -> Result<Json<User>, ApiError> {
    let user = state.service.get_user(query.id).await?;
    Ok(Json(user))
}

/// Create a user, optionally geocoding an address for it.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.service.create_user(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Users whose address is within `distance` km of the given point.
pub async fn users_within(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PerimeterQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let perimeter = query.validate()?;
    let users = state.service.users_within(perimeter).await?;
    Ok(Json(users))
}
