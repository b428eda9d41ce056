use crate::api::ratings::aggregate;
use crate::api::{recipe_exists, ErrorResponse};
use crate::get_conn;
use crate::schema::ratings;
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
pub struct RatingAggregate {
    pub average_rating: f64,
    pub number_of_ratings: usize,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/ratings",
    tag = "ratings",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Aggregate rating for the recipe", body = RatingAggregate),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_ratings(
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

    // Computed over the current rows at request time, never cached.
    let values: Vec<i32> = match ratings::table
        .filter(ratings::recipe_id.eq(recipe_id))
        .select(ratings::rating)
        .load(&mut conn)
    {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Failed to fetch ratings: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch ratings")),
            )
                .into_response();
        }
    };

    let (average_rating, number_of_ratings) = aggregate(&values);

    (
        StatusCode::OK,
        Json(RatingAggregate {
            average_rating,
            number_of_ratings,
        }),
    )
        .into_response()
}
