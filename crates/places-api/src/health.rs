use axum::Json;

use places_types::api::MessageResponse;

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World"))
}
