use crate::api::ErrorResponse;
use crate::auth::{require_owner, AuthUser};
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
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
pub struct DeleteRecipeResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = DeleteRecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the recipe owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let recipe: Option<Recipe> = recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(&mut conn)
        .optional()
        .unwrap_or(None);

    let Some(recipe) = recipe else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response();
    };

    if let Err(forbidden) = require_owner(&recipe, &user) {
        return forbidden.into_response();
    }

    // Ingredient links, dietary links, ratings, comments, and favorites go
    // with the recipe via the ON DELETE CASCADE clauses.
    if let Err(e) = diesel::delete(recipes::table.find(recipe.id)).execute(&mut conn) {
        tracing::error!("Failed to delete recipe: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to delete recipe")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(DeleteRecipeResponse {
            message: "Recipe deleted successfully".to_string(),
        }),
    )
        .into_response()
}
