pub mod create;
pub mod list;

use crate::AppState;
use axum::routing::get as get_route;
use axum::Router;
use utoipa::OpenApi;

/// Returns the comment routes, merged into the /api/recipes prefix.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/comments",
        get_route(list::list_comments).post(create::add_comment),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(create::add_comment, list::list_comments),
    components(schemas(
        crate::validation::comments::CommentPayload,
        create::AddCommentResponse,
        list::CommentBody,
    ))
)]
pub struct ApiDoc;
