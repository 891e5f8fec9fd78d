use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use places_types::Address;
use places_types::api::{MessageResponse, PerimeterQuery, UpdateAddressRequest};

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};

pub async fn update_address(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
    JsonBody(req): JsonBody<UpdateAddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let address = state.service.update_address(address_id, req).await?;
    Ok((StatusCode::ACCEPTED, Json(address)))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_address(address_id).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Delete request successfully")),
    ))
}

pub async fn addresses_within(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PerimeterQuery>,
) -> Result<Json<Vec<Address>>, ApiError> {
    let perimeter = query.validate()?;
    let addresses = state.service.addresses_within(perimeter).await?;
    Ok(Json(addresses))
}
