use serde::Deserialize;
use utoipa::ToSchema;

use super::{check_required, double_option};

pub const TITLE_MAX: usize = 200;

/// One (ingredient, quantity, unit) entry on a recipe. Fields are optional
/// so that a malformed element reports its own errors instead of failing
/// the whole body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientEntry {
    pub ingredient_id: Option<i32>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

/// Body for recipe create and update. On update, omitted fields are left
/// untouched; the nullable columns accept an explicit `null` to clear.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub prep_time: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub cook_time: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub servings: Option<Option<i32>>,
    /// Replaces the full ingredient list when present.
    pub ingredients: Option<Vec<IngredientEntry>>,
    /// Replaces the full dietary-restriction tag set when present.
    pub dietary_restrictions: Option<Vec<i32>>,
}

pub fn validate_recipe(payload: &RecipePayload, is_update: bool) -> Vec<String> {
    let mut errors = Vec::new();

    if !check_required(&mut errors, "title", &payload.title, is_update) {
        let title = payload.title.as_deref().unwrap();
        if title.trim().is_empty() {
            errors.push("title cannot be empty".to_string());
        } else if title.chars().count() > TITLE_MAX {
            errors.push(format!("title must be {TITLE_MAX} characters or fewer"));
        }
    }

    if !check_required(&mut errors, "description", &payload.description, is_update)
        && payload.description.as_deref().unwrap().trim().is_empty()
    {
        errors.push("description cannot be empty".to_string());
    }

    if !check_required(&mut errors, "instructions", &payload.instructions, is_update)
        && payload.instructions.as_deref().unwrap().trim().is_empty()
    {
        errors.push("instructions cannot be empty".to_string());
    }

    if let Some(Some(id)) = payload.category_id {
        if id <= 0 {
            errors.push("category_id must be a positive integer".to_string());
        }
    }

    if let Some(Some(t)) = payload.prep_time {
        if t < 0 {
            errors.push("prep_time cannot be negative".to_string());
        }
    }

    if let Some(Some(t)) = payload.cook_time {
        if t < 0 {
            errors.push("cook_time cannot be negative".to_string());
        }
    }

    if let Some(Some(s)) = payload.servings {
        if s <= 0 {
            errors.push("servings must be greater than 0".to_string());
        }
    }

    if let Some(ingredients) = &payload.ingredients {
        for (index, entry) in ingredients.iter().enumerate() {
            validate_ingredient_entry(&mut errors, index + 1, entry);
        }
    }

    if let Some(restrictions) = &payload.dietary_restrictions {
        for (index, id) in restrictions.iter().enumerate() {
            if *id <= 0 {
                errors.push(format!(
                    "dietary restriction {}: id must be a positive integer",
                    index + 1
                ));
            }
        }
    }

    errors
}

fn validate_ingredient_entry(errors: &mut Vec<String>, position: usize, entry: &IngredientEntry) {
    match entry.ingredient_id {
        None => errors.push(format!("ingredient {position}: ingredient_id is required")),
        Some(id) if id <= 0 => errors.push(format!(
            "ingredient {position}: ingredient_id must be a positive integer"
        )),
        Some(_) => {}
    }

    match entry.quantity {
        None => errors.push(format!("ingredient {position}: quantity is required")),
        // NaN fails this comparison too
        Some(q) if !(q > 0.0) => errors.push(format!(
            "ingredient {position}: quantity must be greater than 0"
        )),
        Some(_) => {}
    }

    match entry.unit.as_deref() {
        None => errors.push(format!("ingredient {position}: unit is required")),
        Some(u) if u.trim().is_empty() => {
            errors.push(format!("ingredient {position}: unit cannot be empty"))
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> RecipePayload {
        RecipePayload {
            title: Some("Shakshuka".to_string()),
            description: Some("Eggs poached in tomato sauce".to_string()),
            instructions: Some("Simmer the sauce, crack in the eggs".to_string()),
            category_id: None,
            image_url: None,
            prep_time: None,
            cook_time: None,
            servings: None,
            ingredients: None,
            dietary_restrictions: None,
        }
    }

    fn entry(id: Option<i32>, quantity: Option<f64>, unit: Option<&str>) -> IngredientEntry {
        IngredientEntry {
            ingredient_id: id,
            quantity,
            unit: unit.map(str::to_string),
        }
    }

    #[test]
    fn minimal_create_is_valid() {
        assert!(validate_recipe(&minimal(), false).is_empty());
    }

    #[test]
    fn create_requires_text_fields() {
        let empty = RecipePayload {
            title: None,
            description: None,
            instructions: None,
            ..minimal()
        };
        let errors = validate_recipe(&empty, false);
        assert_eq!(errors.len(), 3);
        assert!(validate_recipe(&empty, true).is_empty());
    }

    #[test]
    fn blank_text_rejected_even_on_update() {
        let mut p = minimal();
        p.title = Some("   ".to_string());
        p.description = Some("".to_string());
        let errors = validate_recipe(&p, true);
        assert!(errors.iter().any(|e| e == "title cannot be empty"));
        assert!(errors.iter().any(|e| e == "description cannot be empty"));
    }

    #[test]
    fn title_length_cap() {
        let mut p = minimal();
        p.title = Some("x".repeat(201));
        assert_eq!(
            validate_recipe(&p, false),
            vec!["title must be 200 characters or fewer".to_string()]
        );
        p.title = Some("x".repeat(200));
        assert!(validate_recipe(&p, false).is_empty());
    }

    #[test]
    fn numeric_field_bounds() {
        let mut p = minimal();
        p.prep_time = Some(Some(0));
        p.cook_time = Some(Some(-5));
        p.servings = Some(Some(0));
        let errors = validate_recipe(&p, false);
        assert!(errors.iter().any(|e| e == "cook_time cannot be negative"));
        assert!(errors.iter().any(|e| e == "servings must be greater than 0"));
        // prep_time of zero is allowed
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn explicit_null_clears_are_valid() {
        let mut p = minimal();
        p.category_id = Some(None);
        p.image_url = Some(None);
        p.servings = Some(None);
        assert!(validate_recipe(&p, true).is_empty());
    }

    #[test]
    fn ingredient_entries_addressed_by_position() {
        let mut p = minimal();
        p.ingredients = Some(vec![
            entry(Some(1), Some(2.5), Some("cups")),
            entry(None, Some(0.0), Some("  ")),
        ]);
        let errors = validate_recipe(&p, false);
        assert_eq!(
            errors,
            vec![
                "ingredient 2: ingredient_id is required".to_string(),
                "ingredient 2: quantity must be greater than 0".to_string(),
                "ingredient 2: unit cannot be empty".to_string(),
            ]
        );
    }

    #[test]
    fn nan_quantity_rejected() {
        let mut p = minimal();
        p.ingredients = Some(vec![entry(Some(1), Some(f64::NAN), Some("g"))]);
        assert_eq!(validate_recipe(&p, false).len(), 1);
    }

    #[test]
    fn dietary_ids_addressed_by_position() {
        let mut p = minimal();
        p.dietary_restrictions = Some(vec![3, 0, -1]);
        let errors = validate_recipe(&p, false);
        assert_eq!(
            errors,
            vec![
                "dietary restriction 2: id must be a positive integer".to_string(),
                "dietary restriction 3: id must be a positive integer".to_string(),
            ]
        );
    }
}
