use crate::api::categories::CategoryBody;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Category;
use crate::schema::categories;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "lookups",
    responses(
        (status = 200, description = "All recipe categories", body = [CategoryBody]),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let rows: Vec<Category> = match categories::table
        .select(Category::as_select())
        .order(categories::name.asc())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch categories: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch categories")),
            )
                .into_response();
        }
    };

    let categories: Vec<CategoryBody> = rows
        .into_iter()
        .map(|c| CategoryBody {
            category_id: c.id,
            name: c.name,
        })
        .collect();

    (StatusCode::OK, Json(categories)).into_response()
}
