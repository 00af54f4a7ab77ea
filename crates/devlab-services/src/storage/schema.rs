//! Database schema initialization

use rusqlite::Connection;

use crate::types::errors::ServiceResult;

/// Initialize database schema (idempotent)
pub(super) fn init_schema(conn: &Connection) -> ServiceResult<()> {
    conn.execute_batch(
        r#"
        -- Device catalog; embedded experiment tables live in the
        -- device_specific_data JSON column, persisted verbatim
        CREATE TABLE IF NOT EXISTS devices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            device_type TEXT NOT NULL,
            substrate TEXT NOT NULL,
            device_number TEXT NOT NULL UNIQUE,
            tech_description TEXT,
            photo_data TEXT,
            created_at TEXT NOT NULL,
            device_specific_data TEXT NOT NULL DEFAULT '[]'
        );
        CREATE INDEX IF NOT EXISTS idx_devices_device_type ON devices(device_type);
        CREATE INDEX IF NOT EXISTS idx_devices_created_at ON devices(created_at);

        -- Named probability curves, data persisted verbatim
        CREATE TABLE IF NOT EXISTS probability_datasets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_probability_datasets_created_at
            ON probability_datasets(created_at);

        -- Accounts
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        -- One profile row per user
        CREATE TABLE IF NOT EXISTS profiles (
            user_id INTEGER PRIMARY KEY,
            user_configs TEXT NOT NULL DEFAULT '[]',
            active_config_id TEXT NOT NULL DEFAULT 'default',
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        );
        "#,
    )?;
    Ok(())
}
