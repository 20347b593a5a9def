use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{clear_session_cookie, hash_password, issue_session_token, session_cookie, verify_password};
use crate::error::{invalid, ApiResult};
use crate::state::AppState;
use caixa_core::users::NewUser;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupBody {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    email: String,
    password: String,
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupBody>,
) -> ApiResult<impl IntoResponse> {
    if body.password.len() < MIN_PASSWORD_LEN {
        return Err(invalid(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let password_hash = hash_password(&body.password)?;
    let user = state
        .user_service
        .register(NewUser {
            id: None,
            name: body.name,
            email: body.email,
            password_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": user.id, "name": user.name, "email": user.email })),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_service
        .get_by_email(&body.email)?
        .filter(|user| verify_password(&body.password, &user.password_hash))
        .ok_or_else(|| invalid("Invalid email or password"))?;

    // First login seeds the user's stock categories; later logins are
    // no-ops. A failure here must not block the login itself.
    if let Err(err) = state.category_service.seed_default_categories(&user.id).await {
        tracing::warn!("default categories for user {} not seeded: {}", user.id, err);
    }

    let token = issue_session_token(&user, &state.jwt_secret)?;
    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(json!({ "id": user.id, "name": user.name, "email": user.email })),
    ))
}

async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        StatusCode::NO_CONTENT,
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}
