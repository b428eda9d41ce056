pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::get as get_route;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the recipe endpoints (mounted at /api/recipes).
/// The ratings, comments, and favorites sub-resources merge their own
/// routers under the same prefix.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get_route(list::list_recipes).post(create::create_recipe),
        )
        .route(
            "/{id}",
            get_route(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        crate::validation::recipes::RecipePayload,
        crate::validation::recipes::IngredientEntry,
        list::RecipeSummary,
        get::RecipeDetail,
        get::AuthorBody,
        get::RecipeIngredientBody,
        create::CreateRecipeResponse,
        update::UpdateRecipeResponse,
        delete::DeleteRecipeResponse,
    ))
)]
pub struct ApiDoc;
