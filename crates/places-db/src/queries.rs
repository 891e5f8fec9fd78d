use places_types::{BoundingBox, Coordinates};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use crate::StoreResult;
use crate::models::{AddressRow, NewAddress, UserRow};

// -- Users --

pub(crate) fn insert_user(conn: &Connection, name: &str) -> StoreResult<UserRow> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO \"user\" (id, name) VALUES (?1, ?2)",
        (&id, name),
    )?;
    Ok(UserRow {
        id,
        name: name.to_string(),
    })
}

pub(crate) fn select_user(conn: &Connection, id: &str) -> StoreResult<Option<UserRow>> {
    let row = conn
        .query_row("SELECT id, name FROM \"user\" WHERE id = ?1", [id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .optional()?;

    Ok(row)
}

pub(crate) fn select_users_with_address(
    conn: &Connection,
) -> StoreResult<Vec<(UserRow, Option<AddressRow>)>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.name, a.id, a.name, a.longitude, a.latitude, a.user_id
         FROM \"user\" u
         LEFT JOIN address a ON a.user_id = u.id
         ORDER BY u.rowid",
    )?;

    let rows = stmt
        .query_map([], |row| {
            let user = UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
            };
            let address = match row.get::<_, Option<String>>(2)? {
                Some(id) => Some(AddressRow {
                    id,
                    name: row.get(3)?,
                    coordinates: coordinates_at(row, 4)?,
                    user_id: row.get(6)?,
                }),
                None => None,
            };
            Ok((user, address))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

// -- Addresses --

const ADDRESS_COLUMNS: &str = "id, name, longitude, latitude, user_id";

pub(crate) fn insert_address(conn: &Connection, address: &NewAddress) -> StoreResult<AddressRow> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO address (id, name, longitude, latitude, user_id) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            &id,
            &address.name,
            address.coordinates.longitude(),
            address.coordinates.latitude(),
            &address.user_id,
        ],
    )?;
    Ok(AddressRow {
        id,
        name: address.name.clone(),
        coordinates: address.coordinates,
        user_id: address.user_id.clone(),
    })
}

pub(crate) fn select_address_by_id(conn: &Connection, id: &str) -> StoreResult<Option<AddressRow>> {
    let sql = format!("SELECT {ADDRESS_COLUMNS} FROM address WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], address_from_row).optional()?)
}

pub(crate) fn select_address_by_user_id(
    conn: &Connection,
    user_id: &str,
) -> StoreResult<Option<AddressRow>> {
    let sql = format!("SELECT {ADDRESS_COLUMNS} FROM address WHERE user_id = ?1");
    Ok(conn.query_row(&sql, [user_id], address_from_row).optional()?)
}

pub(crate) fn update_address(
    conn: &Connection,
    id: &str,
    name: &str,
    coordinates: Coordinates,
) -> StoreResult<Option<AddressRow>> {
    let sql = format!(
        "UPDATE address SET name = ?1, longitude = ?2, latitude = ?3 WHERE id = ?4
         RETURNING {ADDRESS_COLUMNS}"
    );
    let row = conn
        .query_row(
            &sql,
            params![name, coordinates.longitude(), coordinates.latitude(), id],
            address_from_row,
        )
        .optional()?;

    Ok(row)
}

/// Returns the number of rows removed.
pub(crate) fn delete_address(conn: &Connection, id: &str) -> StoreResult<usize> {
    Ok(conn.execute("DELETE FROM address WHERE id = ?1", [id])?)
}

pub(crate) fn select_addresses(conn: &Connection) -> StoreResult<Vec<AddressRow>> {
    let sql = format!("SELECT {ADDRESS_COLUMNS} FROM address ORDER BY rowid");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], address_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub(crate) fn select_addresses_in_bbox(
    conn: &Connection,
    bbox: &BoundingBox,
) -> StoreResult<Vec<AddressRow>> {
    // A box across the antimeridian is two longitude ranges.
    let longitude_clause = if bbox.crosses_antimeridian() {
        "(longitude >= ?3 OR longitude <= ?4)"
    } else {
        "longitude BETWEEN ?3 AND ?4"
    };
    let sql = format!(
        "SELECT {ADDRESS_COLUMNS} FROM address
         WHERE latitude BETWEEN ?1 AND ?2 AND {longitude_clause}
         ORDER BY rowid"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            params![
                bbox.min_latitude,
                bbox.max_latitude,
                bbox.min_longitude,
                bbox.max_longitude
            ],
            address_from_row,
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn address_from_row(row: &Row<'_>) -> rusqlite::Result<AddressRow> {
    Ok(AddressRow {
        id: row.get(0)?,
        name: row.get(1)?,
        coordinates: coordinates_at(row, 2)?,
        user_id: row.get(4)?,
    })
}

/// Reads a longitude column and the latitude column right after it.
fn coordinates_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Coordinates> {
    let longitude: f64 = row.get(idx)?;
    let latitude: f64 = row.get(idx + 1)?;
    Coordinates::new(longitude, latitude)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Real, Box::new(e)))
}
