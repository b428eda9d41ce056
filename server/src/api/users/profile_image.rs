use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::schema::users;
use crate::uploads::processing::{optimize_image, validate_upload};
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileImageResponse {
    pub message: String,
    pub profile_image: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProfileImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/user/me/profile-image",
    tag = "users",
    request_body(content_type = "multipart/form-data", content = ProfileImageRequest),
    responses(
        (status = 200, description = "Profile image uploaded successfully", body = ProfileImageResponse),
        (status = 400, description = "Invalid image upload", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_profile_image(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Get the file from multipart
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No file provided")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Multipart read error: {}", e);
            return (
                e.status(),
                Json(ErrorResponse::new(format!(
                    "Failed to read multipart data: {}",
                    e.body_text()
                ))),
            )
                .into_response();
        }
    };

    let filename = field.file_name().map(str::to_string);

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            return (
                e.status(),
                Json(ErrorResponse::new(format!(
                    "Failed to read file data: {}",
                    e.body_text()
                ))),
            )
                .into_response();
        }
    };

    let errors = validate_upload(filename.as_deref(), &data);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Invalid image upload", errors)),
        )
            .into_response();
    }

    let optimized = match optimize_image(&data) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    };

    // Storage failures are recovered into a 400 as well, not a 500.
    let url = match state.uploader.upload(optimized).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Upload failed: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response();
        }
    };

    let mut conn = get_conn!(state.pool);

    if let Err(e) = diesel::update(users::table.find(user.id))
        .set((
            users::profile_image.eq(&url),
            users::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
    {
        tracing::error!("Failed to save profile image URL: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to update user")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(ProfileImageResponse {
            message: "Profile image uploaded successfully".to_string(),
            profile_image: url,
        }),
    )
        .into_response()
}
