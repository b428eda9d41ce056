use crate::api::ErrorResponse;
use crate::get_conn;
use crate::schema::{recipe_dietary_restrictions, recipes, users};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Filter by category id
    pub category: Option<i32>,
    /// Filter by dietary-restriction id
    pub dietary: Option<i32>,
    /// Case-insensitive substring match over title or description
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub recipe_id: i32,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub author: String,
}

/// ILIKE pattern for a raw search string, with the wildcard characters
/// escaped so they match literally.
fn search_pattern(search: &str) -> String {
    format!(
        "%{}%",
        search.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
    )
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "List of recipes matching the filters", body = [RecipeSummary]),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let pattern = params
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(search_pattern);

    // Filters are independent and compose with AND.
    let mut query = recipes::table.inner_join(users::table).into_boxed();

    if let Some(category_id) = params.category {
        query = query.filter(recipes::category_id.eq(category_id));
    }

    if let Some(dietary_id) = params.dietary {
        query = query.filter(
            recipes::id.eq_any(
                recipe_dietary_restrictions::table
                    .filter(recipe_dietary_restrictions::dietary_restriction_id.eq(dietary_id))
                    .select(recipe_dietary_restrictions::recipe_id),
            ),
        );
    }

    if let Some(ref pattern) = pattern {
        query = query.filter(
            recipes::title
                .ilike(pattern)
                .or(recipes::description.ilike(pattern)),
        );
    }

    let rows: Vec<(i32, String, String, Option<String>, String)> = match query
        .select((
            recipes::id,
            recipes::title,
            recipes::description,
            recipes::image_url,
            users::username,
        ))
        .order(recipes::created_at.desc())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipes")),
            )
                .into_response();
        }
    };

    let recipes: Vec<RecipeSummary> = rows
        .into_iter()
        .map(
            |(recipe_id, title, description, image_url, author)| RecipeSummary {
                recipe_id,
                title,
                description,
                image_url,
                author,
            },
        )
        .collect();

    (StatusCode::OK, Json(recipes)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_in_wildcards() {
        assert_eq!(search_pattern("chicken"), "%chicken%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(search_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(search_pattern("a\\b"), "%a\\\\b%");
    }
}
