use crate::api::{recipe_exists, ErrorResponse};
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::NewComment;
use crate::schema::comments;
use crate::validation::comments::{validate_comment, CommentPayload};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddCommentResponse {
    pub message: String,
    pub comment_id: i32,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/comments",
    tag = "comments",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = CommentPayload,
    responses(
        (status = 201, description = "Comment added successfully", body = AddCommentResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(payload): Json<CommentPayload>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    if !recipe_exists(&mut conn, recipe_id) {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response();
    }

    let errors = validate_comment(&payload);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Validation failed", errors)),
        )
            .into_response();
    }

    // Validation guarantees presence
    let Some(content) = payload.content.as_deref() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        )
            .into_response();
    };

    let comment_id: i32 = match diesel::insert_into(comments::table)
        .values(&NewComment {
            user_id: user.id,
            recipe_id,
            content,
        })
        .returning(comments::id)
        .get_result(&mut conn)
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to add comment: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to add comment")),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(AddCommentResponse {
            message: "Comment added successfully".to_string(),
            comment_id,
        }),
    )
        .into_response()
}
