use crate::Database;
use crate::models::{PostRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    #[allow(clippy::too_many_arguments)]
    pub fn create_user(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        user_handle: &str,
        email: &str,
        password_hash: &str,
        description: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, first_name, last_name, user_handle, email, password, description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![id, first_name, last_name, user_handle, email, password_hash, description],
            )?;
            Ok(())
        })
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn user_by_handle(&self, user_handle: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "user_handle", user_handle))
    }

    pub fn user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    // -- Posts --

    pub fn insert_post(
        &self,
        id: &str,
        content: &str,
        user_handle: &str,
        length: i64,
        time: &str,
        user_id: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (id, content, user_handle, length, time, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, content, user_handle, length, time, user_id],
            )?;
            Ok(())
        })
    }

    /// Every post, newest first. The feed renders all of them.
    pub fn list_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, user_handle, length, time, user_id
                 FROM posts
                 ORDER BY time DESC",
            )?;
            collect_posts(&mut stmt, rusqlite::params![])
        })
    }

    pub fn posts_by_handle(&self, user_handle: &str) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, user_handle, length, time, user_id
                 FROM posts
                 WHERE user_handle = ?1
                 ORDER BY time DESC",
            )?;
            collect_posts(&mut stmt, rusqlite::params![user_handle])
        })
    }
}

/// True when `err` wraps a SQLite UNIQUE/PRIMARY KEY constraint failure.
/// The registration pre-checks are non-atomic, so a concurrent insert can
/// still trip the constraint and must be told apart from real DB faults.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is one of three fixed names, never user input
    let sql = format!(
        "SELECT id, first_name, last_name, user_handle, email, password, description, created_at
         FROM users WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                user_handle: row.get(3)?,
                email: row.get(4)?,
                password: row.get(5)?,
                description: row.get(6)?,
                created_at: row.get(7)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn collect_posts<P: rusqlite::Params>(
    stmt: &mut rusqlite::Statement<'_>,
    params: P,
) -> Result<Vec<PostRow>> {
    let rows = stmt
        .query_map(params, |row| {
            Ok(PostRow {
                id: row.get(0)?,
                content: row.get(1)?,
                user_handle: row.get(2)?,
                length: row.get(3)?,
                time: row.get(4)?,
                user_id: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn add_user(db: &Database, id: &str, handle: &str, email: &str) {
        db.create_user(id, "Test", "User", handle, email, "$argon2$fake", Some("hi"))
            .unwrap();
    }

    #[test]
    fn user_lookup_by_email_handle_and_id() {
        let db = test_db();
        add_user(&db, "u1", "bob", "bob@example.com");

        let by_email = db.user_by_email("bob@example.com").unwrap().unwrap();
        assert_eq!(by_email.user_handle, "bob");
        assert_eq!(by_email.first_name, "Test");

        let by_handle = db.user_by_handle("bob").unwrap().unwrap();
        assert_eq!(by_handle.email, "bob@example.com");

        let by_id = db.user_by_id("u1").unwrap().unwrap();
        assert_eq!(by_id.id, "u1");

        assert!(db.user_by_email("nobody@example.com").unwrap().is_none());
        assert!(db.user_by_handle("nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_a_unique_violation() {
        let db = test_db();
        add_user(&db, "u1", "bob", "bob@example.com");

        let err = db
            .create_user("u2", "Other", "User", "bobby", "bob@example.com", "$argon2$fake", None)
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn duplicate_handle_is_a_unique_violation() {
        let db = test_db();
        add_user(&db, "u1", "bob", "bob@example.com");

        let err = db
            .create_user("u2", "Other", "User", "bob", "other@example.com", "$argon2$fake", None)
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn posts_come_back_newest_first() {
        let db = test_db();
        add_user(&db, "u1", "bob", "bob@example.com");

        db.insert_post("p1", "first", "bob", 5, "2026-08-06T10:00:00Z", "u1")
            .unwrap();
        db.insert_post("p2", "second", "bob", 6, "2026-08-06T11:00:00Z", "u1")
            .unwrap();
        db.insert_post("p3", "third", "bob", 5, "2026-08-06T10:30:00Z", "u1")
            .unwrap();

        let posts = db.list_posts().unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p1"]);
    }

    #[test]
    fn posts_by_handle_filters_and_orders() {
        let db = test_db();
        add_user(&db, "u1", "bob", "bob@example.com");
        add_user(&db, "u2", "eve", "eve@example.com");

        db.insert_post("p1", "from bob", "bob", 8, "2026-08-06T10:00:00Z", "u1")
            .unwrap();
        db.insert_post("p2", "from eve", "eve", 8, "2026-08-06T10:05:00Z", "u2")
            .unwrap();
        db.insert_post("p3", "bob again", "bob", 9, "2026-08-06T10:10:00Z", "u1")
            .unwrap();

        let posts = db.posts_by_handle("bob").unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p1"]);

        assert!(db.posts_by_handle("nobody").unwrap().is_empty());
    }

    #[test]
    fn oversized_content_is_rejected_by_the_schema() {
        let db = test_db();
        add_user(&db, "u1", "bob", "bob@example.com");

        let long = "x".repeat(141);
        let err = db
            .insert_post("p1", &long, "bob", 141, "2026-08-06T10:00:00Z", "u1")
            .unwrap_err();
        // a CHECK failure is a constraint error, but not a uniqueness one
        assert!(!is_unique_violation(&err));
        assert!(db.list_posts().unwrap().is_empty());
    }
}
