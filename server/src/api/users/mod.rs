pub mod get;
pub mod me;
pub mod profile_image;
pub mod update;

use crate::models::User;
use crate::AppState;
use axum::routing::{get as get_route, post};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Public profile shape shared by the account endpoints. The password digest
/// never leaves the data layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserBody {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub profile_image: Option<String>,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            profile_image: user.profile_image,
        }
    }
}

/// Returns the router for the account endpoints (mounted at /api/user)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get_route(me::get_current_user))
        .route("/me/profile-image", post(profile_image::upload_profile_image))
        .route(
            "/{id}",
            get_route(get::get_user).put(update::update_user),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        me::get_current_user,
        get::get_user,
        update::update_user,
        profile_image::upload_profile_image,
    ),
    components(schemas(
        UserBody,
        update::UpdateUserResponse,
        profile_image::ProfileImageResponse,
    ))
)]
pub struct ApiDoc;
