/// Database row types — these map directly to SQLite rows.
/// Distinct from chirp-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub user_handle: String,
    pub email: String,
    pub password: String,
    pub description: Option<String>,
    pub created_at: String,
}

pub struct PostRow {
    pub id: String,
    pub content: String,
    pub user_handle: String,
    pub length: i64,
    pub time: String,
    pub user_id: String,
}
