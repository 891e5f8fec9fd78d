use std::sync::Arc;

use tracing::info;

use places_db::{
    AddressMutation, AddressQuery, AddressRow, Database, NewAddress, StoreError, UserMutation,
    UserQuery, UserRow,
};
use places_geo::{Geocoder, bounding_box_around, within_radius};
use places_types::api::{
    CreateUserRequest, Perimeter, UpdateAddressRequest, normalize_full_name, normalize_place_name,
};
use places_types::{Address, Coordinates, User};

use crate::error::ApiError;

/// The user/address use cases. Geocoding always happens before a transaction
/// is opened, so no scope is held across network I/O.
#[derive(Clone)]
pub struct PlacesService {
    db: Arc<Database>,
    geocoder: Arc<dyn Geocoder>,
}

impl PlacesService {
    pub fn new(db: Arc<Database>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { db, geocoder }
    }

    pub async fn get_user(&self, id: String) -> Result<User, ApiError> {
        self.blocking(move |db| {
            db.store(|store| {
                let user = store.get_user(&id)?;
                let address = match store.get_address_by_user_id(&id) {
                    Ok(address) => Some(address),
                    Err(StoreError::NotFound(_)) => None,
                    Err(e) => return Err(e.into()),
                };
                Ok(to_user(user, address))
            })
        })
        .await
    }

    /// Creates the user and, if requested, its geocoded address in a single
    /// scope: a geocoder miss leaves nothing behind.
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, ApiError> {
        let name = normalize_full_name(&req.name)?;
        let place = match req.address {
            Some(address) => {
                let place_name = normalize_place_name(&address.name)?;
                let coordinates = self.resolve(&place_name).await?;
                Some((place_name, coordinates))
            }
            None => None,
        };

        let user = self
            .blocking(move |db| {
                db.mutable_store(|store| {
                    let user = store.create_user(&name)?;
                    let address = match place {
                        Some((place_name, coordinates)) => Some(store.create_address(NewAddress {
                            name: place_name,
                            coordinates,
                            user_id: user.id.clone(),
                        })?),
                        None => None,
                    };
                    Ok(to_user(user, address))
                })
            })
            .await?;

        info!(user_id = %user.id, with_address = user.address.is_some(), "User created");
        Ok(user)
    }

    pub async fn update_address(
        &self,
        id: String,
        req: UpdateAddressRequest,
    ) -> Result<Address, ApiError> {
        let name = normalize_place_name(&req.name)?;
        let coordinates = self.resolve(&name).await?;

        self.blocking(move |db| {
            db.mutable_store(|store| Ok(to_address(store.update_address(&id, &name, coordinates)?)))
        })
        .await
    }

    pub async fn delete_address(&self, id: String) -> Result<(), ApiError> {
        self.blocking(move |db| db.mutable_store(|store| Ok(store.delete_address(&id)?)))
            .await?;

        info!("Address deleted");
        Ok(())
    }

    /// Users whose address lies within the perimeter.
    pub async fn users_within(&self, perimeter: Perimeter) -> Result<Vec<User>, ApiError> {
        let rows = self
            .blocking(|db| db.store(|store| Ok(store.list_users_with_address()?)))
            .await?;

        let users = rows
            .into_iter()
            .filter_map(|(user, address)| {
                let address = address?;
                in_perimeter(&perimeter, address.coordinates).then(|| to_user(user, Some(address)))
            })
            .collect();

        Ok(users)
    }

    /// Addresses within the perimeter. The store narrows candidates to the
    /// enclosing bounding box; the radius check decides.
    pub async fn addresses_within(&self, perimeter: Perimeter) -> Result<Vec<Address>, ApiError> {
        let bbox = bounding_box_around(perimeter.center, perimeter.radius_km);
        let rows = self
            .blocking(move |db| db.store(|store| Ok(store.list_addresses_in_bbox(&bbox)?)))
            .await?;

        let addresses = rows
            .into_iter()
            .filter(|row| in_perimeter(&perimeter, row.coordinates))
            .map(to_address)
            .collect();

        Ok(addresses)
    }

    async fn resolve(&self, place_name: &str) -> Result<Coordinates, ApiError> {
        Ok(self.geocoder.resolve(place_name).await?)
    }

    /// Runs blocking DB work off the async runtime.
    async fn blocking<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db)).await?
    }
}

fn in_perimeter(perimeter: &Perimeter, point: Coordinates) -> bool {
    within_radius(perimeter.center, perimeter.radius_km, point)
}

fn to_address(row: AddressRow) -> Address {
    Address {
        id: row.id,
        name: row.name,
        longitude: row.coordinates.longitude(),
        latitude: row.coordinates.latitude(),
    }
}

fn to_user(row: UserRow, address: Option<AddressRow>) -> User {
    User {
        id: row.id,
        name: row.name,
        address: address.map(to_address),
    }
}
