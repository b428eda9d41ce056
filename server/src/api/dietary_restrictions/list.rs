use crate::api::dietary_restrictions::DietaryRestrictionBody;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::DietaryRestriction;
use crate::schema::dietary_restrictions;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;

#[utoipa::path(
    get,
    path = "/api/dietary-restrictions",
    tag = "lookups",
    responses(
        (status = 200, description = "All dietary restrictions", body = [DietaryRestrictionBody]),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_dietary_restrictions(State(state): State<AppState>) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let rows: Vec<DietaryRestriction> = match dietary_restrictions::table
        .select(DietaryRestriction::as_select())
        .order(dietary_restrictions::name.asc())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch dietary restrictions: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch dietary restrictions")),
            )
                .into_response();
        }
    };

    let restrictions: Vec<DietaryRestrictionBody> = rows
        .into_iter()
        .map(|r| DietaryRestrictionBody {
            dietary_restriction_id: r.id,
            name: r.name,
        })
        .collect();

    (StatusCode::OK, Json(restrictions)).into_response()
}
