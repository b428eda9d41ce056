pub mod auth;
pub mod categories;
pub mod comments;
pub mod dietary_restrictions;
pub mod favorites;
pub mod ingredients;
pub mod ratings;
pub mod recipes;
pub mod users;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Parent-existence check shared by the child-resource handlers; a child
/// write against a missing recipe is a 404 before validation runs.
pub(crate) fn recipe_exists(conn: &mut PgConnection, recipe_id: i32) -> bool {
    select(exists(crate::schema::recipes::table.find(recipe_id)))
        .get_result(conn)
        .unwrap_or(false)
}

/// Shared error response used by all endpoints. `details` carries the
/// accumulated per-field messages on validation failures.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        auth::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        categories::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        dietary_restrictions::ApiDoc::openapi(),
        ratings::ApiDoc::openapi(),
        comments::ApiDoc::openapi(),
        favorites::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
