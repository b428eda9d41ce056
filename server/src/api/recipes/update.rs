use crate::api::recipes::create::ingredient_rows;
use crate::api::ErrorResponse;
use crate::auth::{require_owner, AuthUser};
use crate::get_conn;
use crate::models::{NewRecipeDietaryRestriction, NewRecipeIngredient, Recipe};
use crate::schema::{recipe_dietary_restrictions, recipe_ingredients, recipes};
use crate::validation::recipes::{validate_recipe, RecipePayload};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateRecipeResponse {
    pub message: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChanges<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    instructions: Option<&'a str>,
    category_id: Option<Option<i32>>,
    image_url: Option<Option<&'a str>>,
    prep_time: Option<Option<i32>>,
    cook_time: Option<Option<i32>>,
    servings: Option<Option<i32>>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RecipePayload,
    responses(
        (status = 200, description = "Recipe updated successfully", body = UpdateRecipeResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the recipe owner", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<RecipePayload>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let recipe: Option<Recipe> = recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(&mut conn)
        .optional()
        .unwrap_or(None);

    let Some(recipe) = recipe else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response();
    };

    if let Err(forbidden) = require_owner(&recipe, &user) {
        return forbidden.into_response();
    }

    let errors = validate_recipe(&payload, true);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Validation failed", errors)),
        )
            .into_response();
    }

    let ingredient_links = payload.ingredients.as_deref().map(ingredient_rows);
    let dietary_ids = payload.dietary_restrictions.clone();

    // Omitted fields are untouched; explicit null clears a nullable column.
    // Any mutation advances updated_at.
    let changes = RecipeChanges {
        title: payload.title.as_deref(),
        description: payload.description.as_deref(),
        instructions: payload.instructions.as_deref(),
        category_id: payload.category_id,
        image_url: payload.image_url.as_ref().map(|o| o.as_deref()),
        prep_time: payload.prep_time,
        cook_time: payload.cook_time,
        servings: payload.servings,
        updated_at: Utc::now(),
    };

    let result: Result<(), diesel::result::Error> = conn.transaction(|conn| {
        diesel::update(recipes::table.find(recipe.id))
            .set(&changes)
            .execute(conn)?;

        // Present lists replace the stored set wholesale.
        if let Some(links) = &ingredient_links {
            diesel::delete(
                recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe.id)),
            )
            .execute(conn)?;

            let rows: Vec<NewRecipeIngredient> = links
                .iter()
                .map(|(ingredient_id, quantity, unit)| NewRecipeIngredient {
                    recipe_id: recipe.id,
                    ingredient_id: *ingredient_id,
                    quantity: quantity.clone(),
                    unit: unit.as_str(),
                })
                .collect();

            if !rows.is_empty() {
                diesel::insert_into(recipe_ingredients::table)
                    .values(&rows)
                    .execute(conn)?;
            }
        }

        if let Some(ids) = &dietary_ids {
            diesel::delete(
                recipe_dietary_restrictions::table
                    .filter(recipe_dietary_restrictions::recipe_id.eq(recipe.id)),
            )
            .execute(conn)?;

            let tags: Vec<NewRecipeDietaryRestriction> = ids
                .iter()
                .map(|dietary_restriction_id| NewRecipeDietaryRestriction {
                    recipe_id: recipe.id,
                    dietary_restriction_id: *dietary_restriction_id,
                })
                .collect();

            if !tags.is_empty() {
                diesel::insert_into(recipe_dietary_restrictions::table)
                    .values(&tags)
                    .execute(conn)?;
            }
        }

        Ok(())
    });

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(UpdateRecipeResponse {
                message: "Recipe updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "Referenced category, ingredient, or dietary restriction not found",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to update recipe")),
            )
                .into_response()
        }
    }
}
