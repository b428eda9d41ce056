use crate::api::users::UserBody;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::{http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user's profile", body = UserBody),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_current_user(AuthUser(user): AuthUser) -> impl IntoResponse {
    (StatusCode::OK, Json(UserBody::from(user))).into_response()
}
