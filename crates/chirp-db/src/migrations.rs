use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            user_handle TEXT NOT NULL UNIQUE,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            description TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- user_id and user_handle are plain columns, not foreign keys:
        -- users are never deleted, so there is nothing to cascade.
        CREATE TABLE IF NOT EXISTS posts (
            id          TEXT PRIMARY KEY,
            content     TEXT NOT NULL CHECK (length(content) <= 140),
            user_handle TEXT NOT NULL,
            length      INTEGER NOT NULL,
            time        TEXT NOT NULL,
            user_id     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_posts_time
            ON posts(time);

        CREATE INDEX IF NOT EXISTS idx_posts_handle
            ON posts(user_handle, time);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
