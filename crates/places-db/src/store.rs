//! Capability traits over a transaction scope.
//!
//! [`Store`] is handed out by [`Database::store`](crate::Database::store) and
//! only implements the query traits; [`MutableStore`] comes from
//! [`Database::mutable_store`](crate::Database::mutable_store) and implements
//! all four.

use places_types::{BoundingBox, Coordinates};
use rusqlite::Connection;

use crate::models::{AddressRow, NewAddress, UserRow};
use crate::{StoreError, StoreResult, queries};

pub trait UserQuery {
    fn get_user(&self, id: &str) -> StoreResult<UserRow>;

    /// Every user, each paired with its address if it has one.
    fn list_users_with_address(&self) -> StoreResult<Vec<(UserRow, Option<AddressRow>)>>;
}

pub trait UserMutation: UserQuery {
    fn create_user(&self, name: &str) -> StoreResult<UserRow>;
}

pub trait AddressQuery {
    fn get_address_by_user_id(&self, user_id: &str) -> StoreResult<AddressRow>;
    fn get_address_by_id(&self, id: &str) -> StoreResult<AddressRow>;
    fn list_addresses(&self) -> StoreResult<Vec<AddressRow>>;

    /// Addresses inside `bbox`, edges included.
    fn list_addresses_in_bbox(&self, bbox: &BoundingBox) -> StoreResult<Vec<AddressRow>>;
}

pub trait AddressMutation: AddressQuery {
    fn create_address(&self, address: NewAddress) -> StoreResult<AddressRow>;
    fn update_address(
        &self,
        id: &str,
        name: &str,
        coordinates: Coordinates,
    ) -> StoreResult<AddressRow>;
    fn delete_address(&self, id: &str) -> StoreResult<()>;
}

/// Read-only scope.
pub struct Store<'c> {
    conn: &'c Connection,
}

/// Read-write scope.
pub struct MutableStore<'c> {
    conn: &'c Connection,
}

impl<'c> Store<'c> {
    pub(crate) fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl<'c> MutableStore<'c> {
    pub(crate) fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

macro_rules! impl_queries {
    ($scope:ident) => {
        impl UserQuery for $scope<'_> {
            fn get_user(&self, id: &str) -> StoreResult<UserRow> {
                queries::select_user(self.conn, id)?.ok_or(StoreError::NotFound("user"))
            }

            fn list_users_with_address(
                &self,
            ) -> StoreResult<Vec<(UserRow, Option<AddressRow>)>> {
                queries::select_users_with_address(self.conn)
            }
        }

        impl AddressQuery for $scope<'_> {
            fn get_address_by_user_id(&self, user_id: &str) -> StoreResult<AddressRow> {
                queries::select_address_by_user_id(self.conn, user_id)?
                    .ok_or(StoreError::NotFound("address"))
            }

            fn get_address_by_id(&self, id: &str) -> StoreResult<AddressRow> {
                queries::select_address_by_id(self.conn, id)?
                    .ok_or(StoreError::NotFound("address"))
            }

            fn list_addresses(&self) -> StoreResult<Vec<AddressRow>> {
                queries::select_addresses(self.conn)
            }

            fn list_addresses_in_bbox(&self, bbox: &BoundingBox) -> StoreResult<Vec<AddressRow>> {
                queries::select_addresses_in_bbox(self.conn, bbox)
            }
        }
    };
}

impl_queries!(Store);
impl_queries!(MutableStore);

impl UserMutation for MutableStore<'_> {
    fn create_user(&self, name: &str) -> StoreResult<UserRow> {
        queries::insert_user(self.conn, name)
    }
}

impl AddressMutation for MutableStore<'_> {
    fn create_address(&self, address: NewAddress) -> StoreResult<AddressRow> {
        queries::insert_address(self.conn, &address)
    }

    fn update_address(
        &self,
        id: &str,
        name: &str,
        coordinates: Coordinates,
    ) -> StoreResult<AddressRow> {
        queries::update_address(self.conn, id, name, coordinates)?
            .ok_or(StoreError::NotFound("address"))
    }

    fn delete_address(&self, id: &str) -> StoreResult<()> {
        match queries::delete_address(self.conn, id)? {
            0 => Err(StoreError::NotFound("address")),
            _ => Ok(()),
        }
    }
}
