use axum::{
    Extension,
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::SecondsFormat;
use tracing::error;
use uuid::Uuid;

use chirp_types::forms::{PostForm, ValidateForm};
use chirp_types::models::Claims;

use crate::error::AppError;
use crate::{AppState, views};

pub async fn posts_page(Extension(claims): Extension<Claims>) -> Html<String> {
    Html(views::post_form_page(&PostForm::default(), &[], &claims))
}

/// POST `/posts`: create a post as the session's user and go back to the
/// feed. `length` is the character count of the content; author identity
/// comes from the session, never the form.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(Html(views::post_form_page(&form, &errors, &claims)).into_response());
    }

    let post_id = Uuid::new_v4();
    let length = form.content.chars().count() as i64;
    // Fixed-width UTC timestamps so `ORDER BY time` stays chronological.
    let time = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let content = form.content;
    let user_handle = claims.handle.clone();
    let user_id = claims.sub.to_string();
    tokio::task::spawn_blocking(move || {
        db.db
            .insert_post(&post_id.to_string(), &content, &user_handle, length, &time, &user_id)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        anyhow::anyhow!(e)
    })??;

    Ok(Redirect::to("/").into_response())
}
