use crate::api::{recipe_exists, ErrorResponse};
use crate::get_conn;
use crate::schema::{comments, users};
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
pub struct CommentBody {
    pub comment_id: i32,
    pub user_id: i32,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/comments",
    tag = "comments",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Comments on the recipe, oldest first", body = [CommentBody]),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    if !recipe_exists(&mut conn, recipe_id) {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response();
    }

    let rows: Vec<(i32, i32, String, String, DateTime<Utc>)> = match comments::table
        .inner_join(users::table)
        .filter(comments::recipe_id.eq(recipe_id))
        .select((
            comments::id,
            comments::user_id,
            users::username,
            comments::content,
            comments::created_at,
        ))
        .order(comments::created_at.asc())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch comments: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch comments")),
            )
                .into_response();
        }
    };

    let comments: Vec<CommentBody> = rows
        .into_iter()
        .map(
            |(comment_id, user_id, username, content, created_at)| CommentBody {
                comment_id,
                user_id,
                username,
                content,
                created_at,
            },
        )
        .collect();

    (StatusCode::OK, Json(comments)).into_response()
}
