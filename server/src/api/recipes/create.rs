use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{NewRecipe, NewRecipeDietaryRestriction, NewRecipeIngredient};
use crate::schema::{recipe_dietary_restrictions, recipe_ingredients, recipes};
use crate::validation::recipes::{validate_recipe, IngredientEntry, RecipePayload};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bigdecimal::{rounding::RoundingMode, BigDecimal};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub message: String,
    pub recipe_id: i32,
}

/// Quantities are stored with two fraction digits.
pub(super) fn ingredient_rows(entries: &[IngredientEntry]) -> Vec<(i32, BigDecimal, String)> {
    entries
        .iter()
        .filter_map(|entry| {
            // Validation guarantees presence; a conversion miss drops nothing
            // in practice since quantities are finite and positive.
            let ingredient_id = entry.ingredient_id?;
            let quantity = BigDecimal::try_from(entry.quantity?).ok()?;
            let unit = entry.unit.clone()?;
            Some((
                ingredient_id,
                quantity.with_scale_round(2, RoundingMode::HalfUp),
                unit,
            ))
        })
        .collect()
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipePayload,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Referenced entity not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<RecipePayload>,
) -> impl IntoResponse {
    let errors = validate_recipe(&payload, false);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Validation failed", errors)),
        )
            .into_response();
    }

    // Validation guarantees presence on create
    let (Some(title), Some(description), Some(instructions)) = (
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.instructions.as_deref(),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        )
            .into_response();
    };

    let ingredient_links = payload
        .ingredients
        .as_deref()
        .map(ingredient_rows)
        .unwrap_or_default();
    let dietary_ids = payload.dietary_restrictions.clone().unwrap_or_default();

    let new_recipe = NewRecipe {
        user_id: user.id,
        title,
        description,
        instructions,
        category_id: payload.category_id.flatten(),
        image_url: payload.image_url.as_ref().and_then(|o| o.as_deref()),
        prep_time: payload.prep_time.flatten(),
        cook_time: payload.cook_time.flatten(),
        servings: payload.servings.flatten(),
    };

    let mut conn = get_conn!(state.pool);

    // Recipe plus its links are created atomically; an invalid referenced id
    // rolls back the whole insert.
    let result: Result<i32, diesel::result::Error> = conn.transaction(|conn| {
        let recipe_id: i32 = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::id)
            .get_result(conn)?;

        let links: Vec<NewRecipeIngredient> = ingredient_links
            .iter()
            .map(|(ingredient_id, quantity, unit)| NewRecipeIngredient {
                recipe_id,
                ingredient_id: *ingredient_id,
                quantity: quantity.clone(),
                unit: unit.as_str(),
            })
            .collect();

        if !links.is_empty() {
            diesel::insert_into(recipe_ingredients::table)
                .values(&links)
                .execute(conn)?;
        }

        let tags: Vec<NewRecipeDietaryRestriction> = dietary_ids
            .iter()
            .map(|dietary_restriction_id| NewRecipeDietaryRestriction {
                recipe_id,
                dietary_restriction_id: *dietary_restriction_id,
            })
            .collect();

        if !tags.is_empty() {
            diesel::insert_into(recipe_dietary_restrictions::table)
                .values(&tags)
                .execute(conn)?;
        }

        Ok(recipe_id)
    });

    match result {
        Ok(recipe_id) => (
            StatusCode::CREATED,
            Json(CreateRecipeResponse {
                message: "Recipe created successfully".to_string(),
                recipe_id,
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
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to create recipe")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i32, quantity: f64, unit: &str) -> IngredientEntry {
        IngredientEntry {
            ingredient_id: Some(id),
            quantity: Some(quantity),
            unit: Some(unit.to_string()),
        }
    }

    #[test]
    fn quantities_round_to_two_fraction_digits() {
        let rows = ingredient_rows(&[entry(1, 0.125, "cups"), entry(2, 2.0, "tbsp")]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1.to_string(), "0.13");
        assert_eq!(rows[1].1.to_string(), "2.00");
        assert_eq!(rows[1].2, "tbsp");
    }
}
