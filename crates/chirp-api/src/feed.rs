use axum::{
    Extension,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, warn};
use uuid::Uuid;

use chirp_db::models::{PostRow, UserRow};
use chirp_types::models::{Claims, Post, User};

use crate::error::AppError;
use crate::{AppState, flash, session, views};

/// GET `/`: the global feed, newest first, for both anonymous and
/// authenticated callers. Renders every stored post.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_posts())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::anyhow!(e)
        })??;

    let posts: Vec<Post> = rows.into_iter().map(post_from_row).collect();

    let viewer = session::current(&jar, &state.session_secret);
    let (jar, message) = flash::take(jar);

    Ok((
        jar,
        Html(views::feed_page(&posts, viewer.as_ref(), message.as_deref())),
    )
        .into_response())
}

/// GET `/profile/{user_handle}`: authenticated-only. An unknown handle still
/// renders, with no identity card and an empty post list.
pub async fn profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_handle): Path<String>,
) -> Result<Response, AppError> {
    let db = state.clone();
    let handle = user_handle.clone();
    let (user_row, rows) = tokio::task::spawn_blocking(move || {
        let user = db.db.user_by_handle(&handle)?;
        let posts = db.db.posts_by_handle(&handle)?;
        Ok::<_, anyhow::Error>((user, posts))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        anyhow::anyhow!(e)
    })??;

    let user = user_row.map(user_from_row);
    let posts: Vec<Post> = rows.into_iter().map(post_from_row).collect();

    Ok(Html(views::profile_page(&user_handle, user.as_ref(), &posts, &claims)).into_response())
}

// -- Row conversions --

pub(crate) fn post_from_row(row: PostRow) -> Post {
    Post {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt post id '{}': {}", row.id, e);
            Uuid::default()
        }),
        content: row.content,
        user_handle: row.user_handle,
        length: row.length,
        time: parse_timestamp(&row.time, &row.id),
        user_id: row.user_id.parse().unwrap_or_else(|e| {
            warn!("Corrupt user_id on post '{}': {}", row.id, e);
            Uuid::default()
        }),
    }
}

pub(crate) fn user_from_row(row: UserRow) -> User {
    User {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt user id '{}': {}", row.id, e);
            Uuid::default()
        }),
        first_name: row.first_name,
        last_name: row.last_name,
        user_handle: row.user_handle,
        email: row.email,
        description: row.description,
        created_at: parse_timestamp(&row.created_at, &row.id),
    }
}

fn parse_timestamp(raw: &str, record_id: &str) -> chrono::DateTime<chrono::Utc> {
    raw.parse::<chrono::DateTime<chrono::Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') default stores "YYYY-MM-DD HH:MM:SS"
            // without a timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on record '{}': {}", raw, record_id, e);
            chrono::DateTime::default()
        })
}
