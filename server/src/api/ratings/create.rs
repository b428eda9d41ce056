use crate::api::{recipe_exists, ErrorResponse};
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::NewRating;
use crate::schema::ratings;
use crate::validation::ratings::{validate_rating, RatingPayload};
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
pub struct SubmitRatingResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/ratings",
    tag = "ratings",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RatingPayload,
    responses(
        (status = 200, description = "Rating submitted successfully", body = SubmitRatingResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_rating(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(payload): Json<RatingPayload>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    if !recipe_exists(&mut conn, recipe_id) {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response();
    }

    let errors = validate_rating(&payload);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Validation failed", errors)),
        )
            .into_response();
    }

    // Validation guarantees presence
    let Some(rating) = payload.rating else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        )
            .into_response();
    };

    // A resubmission overwrites the prior value; the unique index on
    // (user_id, recipe_id) keeps this a single row under concurrency.
    let result = diesel::insert_into(ratings::table)
        .values(&NewRating {
            user_id: user.id,
            recipe_id,
            rating,
        })
        .on_conflict((ratings::user_id, ratings::recipe_id))
        .do_update()
        .set(ratings::rating.eq(rating))
        .execute(&mut conn);

    if let Err(e) = result {
        tracing::error!("Failed to submit rating: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to submit rating")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(SubmitRatingResponse {
            message: "Rating submitted successfully".to_string(),
        }),
    )
        .into_response()
}
