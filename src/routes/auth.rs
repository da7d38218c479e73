use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::{dummy_password_hash, hash_password, sign_jwt_for_user, verify_password};
use crate::extractors::JsonBody;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::users::User;
use crate::store::StoreError;
use crate::validation::{is_valid_email, validate_password};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(value: &User) -> Self {
        Self {
            id: value.id.clone(),
            email: value.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = req.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::bad_request(
            "AUTH_INVALID_EMAIL",
            "Invalid email format",
        ));
    }
    if let Err(msg) = validate_password(&req.password) {
        return Err(AppError::bad_request("AUTH_WEAK_PASSWORD", msg));
    }

    let now = Utc::now();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.clone(),
        password_hash: hash_password(&req.password)?,
        total_attempts: 0,
        total_correct: 0,
        created_at: now,
        updated_at: now,
    };

    // The email-index CAS inside create_user is the uniqueness check.
    state.store().create_user(&user).map_err(|e| match e {
        StoreError::Conflict { .. } => {
            AppError::conflict("AUTH_EMAIL_EXISTS", "Email already registered")
        }
        other => other.into(),
    })?;

    let token = sign_jwt_for_user(
        &user.id,
        &state.config().jwt_secret,
        state.config().jwt_expires_in_hours,
    )?;

    Ok(created(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Some(user) = state.store().get_user_by_email(&req.email)? else {
        // Burn a verification anyway so response timing does not reveal
        // whether the email is registered.
        let _ = verify_password(&req.password, &dummy_password_hash());
        return Err(AppError::unauthorized("Invalid email or password"));
    };

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let token = sign_jwt_for_user(
        &user.id,
        &state.config().jwt_secret,
        state.config().jwt_expires_in_hours,
    )?;

    Ok(ok(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}
