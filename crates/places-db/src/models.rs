//! Database row types. Distinct from places-types API models to keep the DB
//! layer independent of the response shapes.

use places_types::Coordinates;

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressRow {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub name: String,
    pub coordinates: Coordinates,
    pub user_id: String,
}
