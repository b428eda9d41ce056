pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryBody {
    pub category_id: i32,
    pub name: String,
}

/// Returns the router for the category lookup (mounted at /api/categories)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::list_categories))
}

#[derive(OpenApi)]
#[openapi(paths(list::list_categories), components(schemas(CategoryBody)))]
pub struct ApiDoc;
