use crate::api::ingredients::IngredientBody;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::ingredients;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "lookups",
    responses(
        (status = 200, description = "All known ingredients", body = [IngredientBody]),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(State(state): State<AppState>) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let rows: Vec<Ingredient> = match ingredients::table
        .select(Ingredient::as_select())
        .order(ingredients::name.asc())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch ingredients")),
            )
                .into_response();
        }
    };

    let ingredients: Vec<IngredientBody> = rows
        .into_iter()
        .map(|i| IngredientBody {
            ingredient_id: i.id,
            name: i.name,
        })
        .collect();

    (StatusCode::OK, Json(ingredients)).into_response()
}
