pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientBody {
    pub ingredient_id: i32,
    pub name: String,
}

/// Returns the router for the ingredient lookup (mounted at /api/ingredients)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::list_ingredients))
}

#[derive(OpenApi)]
#[openapi(paths(list::list_ingredients), components(schemas(IngredientBody)))]
pub struct ApiDoc;
