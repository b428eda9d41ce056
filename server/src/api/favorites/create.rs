use crate::api::{recipe_exists, ErrorResponse};
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::NewFavorite;
use crate::schema::favorites;
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
pub struct AddFavoriteResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorites",
    tag = "favorites",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Recipe favorited successfully", body = AddFavoriteResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Recipe already favorited", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_favorite(
    AuthUser(user): AuthUser,
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

    // A duplicate favorite is rejected, not silently ignored; the unique
    // index on (user_id, recipe_id) is the enforcement of record.
    let result = diesel::insert_into(favorites::table)
        .values(&NewFavorite {
            user_id: user.id,
            recipe_id,
        })
        .execute(&mut conn);

    match result {
        Ok(_) => (
            StatusCode::CREATED,
            Json(AddFavoriteResponse {
                message: "Recipe favorited successfully".to_string(),
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Recipe already favorited")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to favorite recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to favorite recipe")),
            )
                .into_response()
        }
    }
}
