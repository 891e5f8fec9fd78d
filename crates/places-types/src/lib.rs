pub mod api;
pub mod models;

pub use models::{Address, BoundingBox, Coordinates, User, ValidationError};
