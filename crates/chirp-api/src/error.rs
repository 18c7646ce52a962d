use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;

use crate::{flash, views};

/// Errors that escape a handler. Validation failures and duplicate
/// email/handle hits never reach here; those re-render their form inline.
#[derive(Error, Debug)]
pub enum AppError {
    /// Wrong email or password. Flashes and redirects to the registration
    /// page, matching the login flow's documented behavior.
    #[error("login unsuccessful")]
    AuthenticationFailure,

    /// Storage or token plumbing failure. Logged and rendered as a plain
    /// 500 page; there is no retry or recovery path.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthenticationFailure => {
                let jar = flash::set(CookieJar::new(), "Login Unsuccessful");
                (jar, Redirect::to("/registration")).into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page()),
                )
                    .into_response()
            }
        }
    }
}
