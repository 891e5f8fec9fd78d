use rusqlite::Connection;
use tracing::info;

use crate::StoreResult;

pub fn run(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (user, address)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE \"user\" (
                id      TEXT PRIMARY KEY,
                name    TEXT NOT NULL
            );

            CREATE TABLE address (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                longitude   REAL NOT NULL CHECK (longitude BETWEEN -180 AND 180),
                latitude    REAL NOT NULL CHECK (latitude BETWEEN -90 AND 90),
                user_id     TEXT NOT NULL UNIQUE REFERENCES \"user\"(id) ON DELETE CASCADE
            );

            CREATE INDEX idx_address_coordinates
                ON address(latitude, longitude);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
