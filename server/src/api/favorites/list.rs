use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::schema::{favorites, recipes};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavoriteBody {
    pub recipe_id: i32,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/user/me/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "The authenticated user's favorite recipes", body = [FavoriteBody]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_favorites(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let rows: Vec<(i32, String, String, Option<String>)> = match favorites::table
        .inner_join(recipes::table)
        .filter(favorites::user_id.eq(user.id))
        .select((
            recipes::id,
            recipes::title,
            recipes::description,
            recipes::image_url,
        ))
        .order(favorites::created_at.desc())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch favorites: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch favorites")),
            )
                .into_response();
        }
    };

    let favorites: Vec<FavoriteBody> = rows
        .into_iter()
        .map(|(recipe_id, title, description, image_url)| FavoriteBody {
            recipe_id,
            title,
            description,
            image_url,
        })
        .collect();

    (StatusCode::OK, Json(favorites)).into_response()
}
