pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DietaryRestrictionBody {
    pub dietary_restriction_id: i32,
    pub name: String,
}

/// Returns the router for the dietary-restriction lookup
/// (mounted at /api/dietary-restrictions)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::list_dietary_restrictions))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_dietary_restrictions),
    components(schemas(DietaryRestrictionBody))
)]
pub struct ApiDoc;
