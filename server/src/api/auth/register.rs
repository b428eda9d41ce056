use crate::api::users::UserBody;
use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::get_conn;
use crate::models::{NewUser, User};
use crate::schema::users;
use crate::validation::users::{validate_user, UserPayload};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserBody,
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body(content = UserPayload, example = json!({"username": "ann", "email": "ann@x.com", "password": "Passw0rd"})),
    responses(
        (status = 201, description = "Account created successfully", body = RegisterResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> impl IntoResponse {
    let errors = validate_user(&payload, false);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Validation failed", errors)),
        )
            .into_response();
    }

    // Validation guarantees presence on create
    let (Some(username), Some(email), Some(password)) = (
        payload.username.as_deref(),
        payload.email.as_deref(),
        payload.password.as_deref(),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        )
            .into_response();
    };

    let mut conn = get_conn!(state.pool);

    let email_taken: Option<i32> = users::table
        .filter(users::email.eq(email))
        .select(users::id)
        .first(&mut conn)
        .optional()
        .unwrap_or(None);

    if email_taken.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Email already registered")),
        )
            .into_response();
    }

    let username_taken: Option<i32> = users::table
        .filter(users::username.eq(username))
        .select(users::id)
        .first(&mut conn)
        .optional()
        .unwrap_or(None);

    if username_taken.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Username already taken")),
        )
            .into_response();
    }

    let password_hash = match hash_password(password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to create user")),
            )
                .into_response();
        }
    };

    let new_user = NewUser {
        username,
        email,
        password_hash: &password_hash,
        profile_image: payload.profile_image.as_ref().and_then(|o| o.as_deref()),
    };

    let user: User = match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        // The unique constraints are the enforcement of record for
        // concurrent registrations that pass the checks above.
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("Username or email already registered")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to create user")),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    )
        .into_response()
}
