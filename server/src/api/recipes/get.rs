use crate::api::categories::CategoryBody;
use crate::api::dietary_restrictions::DietaryRestrictionBody;
use crate::api::ratings;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::{Category, DietaryRestriction, Recipe};
use crate::schema::{
    categories, dietary_restrictions, ingredients, ratings as ratings_table,
    recipe_dietary_restrictions, recipe_ingredients, recipes, users,
};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorBody {
    pub user_id: i32,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeIngredientBody {
    pub ingredient_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub recipe_id: i32,
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub image_url: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub author: AuthorBody,
    pub category: Option<CategoryBody>,
    pub ingredients: Vec<RecipeIngredientBody>,
    pub dietary_restrictions: Vec<DietaryRestrictionBody>,
    pub average_rating: f64,
    pub ratings_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let recipe: Option<(Recipe, i32, String)> = recipes::table
        .inner_join(users::table)
        .filter(recipes::id.eq(id))
        .select((Recipe::as_select(), users::id, users::username))
        .first(&mut conn)
        .optional()
        .unwrap_or(None);

    let Some((recipe, author_id, author_name)) = recipe else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response();
    };

    let category: Option<Category> = match recipe.category_id {
        Some(category_id) => categories::table
            .find(category_id)
            .select(Category::as_select())
            .first(&mut conn)
            .optional()
            .unwrap_or(None),
        None => None,
    };

    let ingredient_rows: Vec<(i32, String, BigDecimal, String)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe.id))
        .select((
            ingredients::id,
            ingredients::name,
            recipe_ingredients::quantity,
            recipe_ingredients::unit,
        ))
        .load(&mut conn)
        .unwrap_or_default();

    let restrictions: Vec<DietaryRestriction> = recipe_dietary_restrictions::table
        .inner_join(dietary_restrictions::table)
        .filter(recipe_dietary_restrictions::recipe_id.eq(recipe.id))
        .select(DietaryRestriction::as_select())
        .load(&mut conn)
        .unwrap_or_default();

    let rating_values: Vec<i32> = ratings_table::table
        .filter(ratings_table::recipe_id.eq(recipe.id))
        .select(ratings_table::rating)
        .load(&mut conn)
        .unwrap_or_default();

    let (average_rating, ratings_count) = ratings::aggregate(&rating_values);

    let detail = RecipeDetail {
        recipe_id: recipe.id,
        title: recipe.title,
        description: recipe.description,
        instructions: recipe.instructions,
        image_url: recipe.image_url,
        prep_time: recipe.prep_time,
        cook_time: recipe.cook_time,
        servings: recipe.servings,
        author: AuthorBody {
            user_id: author_id,
            username: author_name,
        },
        category: category.map(|c| CategoryBody {
            category_id: c.id,
            name: c.name,
        }),
        ingredients: ingredient_rows
            .into_iter()
            .map(|(ingredient_id, name, quantity, unit)| RecipeIngredientBody {
                ingredient_id,
                name,
                quantity: quantity.to_f64().unwrap_or(0.0),
                unit,
            })
            .collect(),
        dietary_restrictions: restrictions
            .into_iter()
            .map(|r| DietaryRestrictionBody {
                dietary_restriction_id: r.id,
                name: r.name,
            })
            .collect(),
        average_rating,
        ratings_count,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
    };

    (StatusCode::OK, Json(detail)).into_response()
}
