use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};
use uuid::Uuid;

use chirp_db::queries::is_unique_violation;
use chirp_types::forms::{LoginForm, RegistrationForm, ValidateForm};

use crate::error::AppError;
use crate::{AppState, flash, session, views};

const DUPLICATE_EMAIL: &str = "this Email is already taken!";
const DUPLICATE_HANDLE: &str = "this Handle is already taken!";

pub async fn registration_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    if session::current(&jar, &state.session_secret).is_some() {
        return Redirect::to("/").into_response();
    }

    let (jar, message) = flash::take(jar);
    (
        jar,
        Html(views::registration_page(
            &RegistrationForm::default(),
            &[],
            message.as_deref(),
        )),
    )
        .into_response()
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    if session::current(&jar, &state.session_secret).is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if let Err(errors) = form.validate() {
        return Ok(Html(views::registration_page(&form, &errors, None)).into_response());
    }

    if state.db.user_by_email(&form.email)?.is_some() {
        return Ok(
            Html(views::registration_page(&form, &[], Some(DUPLICATE_EMAIL))).into_response(),
        );
    }
    if state.db.user_by_handle(&form.user_handle)?.is_some() {
        return Ok(
            Html(views::registration_page(&form, &[], Some(DUPLICATE_HANDLE))).into_response(),
        );
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(form.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    let user_id = Uuid::new_v4();

    let created = state.db.create_user(
        &user_id.to_string(),
        &form.first_name,
        &form.last_name,
        &form.user_handle,
        &form.email,
        &password_hash,
        Some(form.description.as_str()),
    );

    match created {
        Ok(()) => {
            info!("registered user {}", form.user_handle);
            // A session is not established here: new users log in explicitly.
            Ok(Redirect::to("/login").into_response())
        }
        // Pre-checks above are non-atomic; a concurrent registration can
        // still hit the UNIQUE constraint.
        Err(e) if is_unique_violation(&e) => {
            warn!("registration lost a uniqueness race for {}", form.user_handle);
            Ok(Html(views::registration_page(&form, &[], Some(DUPLICATE_EMAIL))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    if session::current(&jar, &state.session_secret).is_some() {
        return Redirect::to("/").into_response();
    }

    let (jar, message) = flash::take(jar);
    (
        jar,
        Html(views::login_page(
            &LoginForm::default(),
            &[],
            message.as_deref(),
        )),
    )
        .into_response()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if session::current(&jar, &state.session_secret).is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if let Err(errors) = form.validate() {
        return Ok(Html(views::login_page(&form, &errors, None)).into_response());
    }

    let user = state
        .db
        .user_by_email(&form.email)?
        .ok_or(AppError::AuthenticationFailure)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored hash unreadable: {}", e))?;

    Argon2::default()
        .verify_password(form.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::AuthenticationFailure)?;

    let jar = session::establish(jar, &state.session_secret, &user)?;
    info!("user {} logged in", user.user_handle);

    Ok((jar, Redirect::to("/")).into_response())
}

/// Unconditional: logging out while anonymous is a no-op that still
/// redirects home.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = session::clear(jar);
    (jar, Redirect::to("/"))
}
