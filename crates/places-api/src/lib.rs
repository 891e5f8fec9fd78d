pub mod addresses;
pub mod error;
pub mod extract;
pub mod health;
pub mod service;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};

use crate::service::PlacesService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub service: PlacesService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::hello))
        .route("/user", get(users::get_user).post(users::create_user))
        .route("/users", get(users::users_within))
        .route(
            "/address/{address_id}",
            put(addresses::update_address).delete(addresses::delete_address),
        )
        .route("/addresses", get(addresses::addresses_within))
        .with_state(state)
}
