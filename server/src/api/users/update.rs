use crate::api::users::UserBody;
use crate::api::ErrorResponse;
use crate::auth::{hash_password, require_owner, AuthUser};
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use crate::validation::users::{validate_user, UserPayload};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateUserResponse {
    pub message: String,
    pub user: UserBody,
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct UserChanges<'a> {
    username: Option<&'a str>,
    email: Option<&'a str>,
    password_hash: Option<String>,
    profile_image: Option<Option<&'a str>>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated successfully", body = UpdateUserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the account owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user(
    AuthUser(auth_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UserPayload>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let target: Option<User> = users::table
        .find(id)
        .select(User::as_select())
        .first(&mut conn)
        .optional()
        .unwrap_or(None);

    let Some(target) = target else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        )
            .into_response();
    };

    if let Err(forbidden) = require_owner(&target, &auth_user) {
        return forbidden.into_response();
    }

    let errors = validate_user(&payload, true);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Validation failed", errors)),
        )
            .into_response();
    }

    // Uniqueness checks exclude the record's own row so a field may be
    // "updated" to its current value.
    if let Some(username) = payload.username.as_deref() {
        let taken: Option<i32> = users::table
            .filter(users::username.eq(username))
            .filter(users::id.ne(id))
            .select(users::id)
            .first(&mut conn)
            .optional()
            .unwrap_or(None);

        if taken.is_some() {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("Username already taken")),
            )
                .into_response();
        }
    }

    if let Some(email) = payload.email.as_deref() {
        let taken: Option<i32> = users::table
            .filter(users::email.eq(email))
            .filter(users::id.ne(id))
            .select(users::id)
            .first(&mut conn)
            .optional()
            .unwrap_or(None);

        if taken.is_some() {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("Email already registered")),
            )
                .into_response();
        }
    }

    let password_hash = match payload.password.as_deref() {
        Some(password) => match hash_password(password) {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::error!("Failed to hash password: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Failed to update user")),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let changes = UserChanges {
        username: payload.username.as_deref(),
        email: payload.email.as_deref(),
        password_hash,
        profile_image: payload.profile_image.as_ref().map(|o| o.as_deref()),
        updated_at: Utc::now(),
    };

    let updated: User = match diesel::update(users::table.find(id))
        .set(&changes)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
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
            tracing::error!("Failed to update user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to update user")),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(UpdateUserResponse {
            message: "User updated successfully".to_string(),
            user: updated.into(),
        }),
    )
        .into_response()
}
