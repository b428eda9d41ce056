use crate::api::ErrorResponse;
use crate::models::{Recipe, User};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Capability marker for rows that belong to a single account.
///
/// Only models carrying an owner column implement this, so a handler can
/// only ask for an ownership check on resources that actually have one.
pub trait Owned {
    fn owner_id(&self) -> i32;
}

impl Owned for Recipe {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for User {
    fn owner_id(&self) -> i32 {
        self.id
    }
}

pub struct Forbidden;

impl IntoResponse for Forbidden {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("You do not own this resource")),
        )
            .into_response()
    }
}

/// Reject with 403 when the authenticated user is not the resource owner.
/// Existence of the resource is not hidden from a wrong, but authenticated,
/// caller - the 404 check happens before this one.
pub fn require_owner<T: Owned>(resource: &T, user: &User) -> Result<(), Forbidden> {
    if resource.owner_id() == user.id {
        Ok(())
    } else {
        Err(Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i32) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            profile_image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn recipe(owner: i32) -> Recipe {
        Recipe {
            id: 1,
            user_id: owner,
            title: "Toast".to_string(),
            description: "Bread, but better".to_string(),
            instructions: "Toast the bread".to_string(),
            category_id: None,
            image_url: None,
            prep_time: None,
            cook_time: None,
            servings: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_passes() {
        assert!(require_owner(&recipe(7), &user(7)).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        assert!(require_owner(&recipe(7), &user(8)).is_err());
    }

    #[test]
    fn account_owns_itself() {
        assert!(require_owner(&user(3), &user(3)).is_ok());
        assert!(require_owner(&user(3), &user(4)).is_err());
    }
}
