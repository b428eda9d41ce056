pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Favorite/unfavorite routes, merged into the /api/recipes prefix.
pub fn recipe_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/favorites",
        post(create::add_favorite).delete(delete::remove_favorite),
    )
}

/// The "my favorites" listing, merged into the /api/user prefix.
pub fn user_router() -> Router<AppState> {
    Router::new().route("/me/favorites", get(list::list_favorites))
}

#[derive(OpenApi)]
#[openapi(
    paths(create::add_favorite, delete::remove_favorite, list::list_favorites),
    components(schemas(
        create::AddFavoriteResponse,
        delete::RemoveFavoriteResponse,
        list::FavoriteBody,
    ))
)]
pub struct ApiDoc;
