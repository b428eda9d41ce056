use serde::Deserialize;
use utoipa::ToSchema;

use super::{check_required, double_option};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 8;

/// Body for both registration and profile update; on update every field is
/// optional and omitted fields are left untouched.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Explicit `null` clears the stored image URL.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profile_image: Option<Option<String>>,
}

pub fn validate_user(payload: &UserPayload, is_update: bool) -> Vec<String> {
    let mut errors = Vec::new();

    if !check_required(&mut errors, "username", &payload.username, is_update) {
        let username = payload.username.as_deref().unwrap();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&username.chars().count()) {
            errors.push(format!(
                "username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
            ));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            errors.push("username may only contain letters, numbers, and underscores".to_string());
        }
    }

    if !check_required(&mut errors, "email", &payload.email, is_update) {
        let email = payload.email.as_deref().unwrap();
        if !is_email_shaped(email) {
            errors.push("email is not a valid email address".to_string());
        }
    }

    if !check_required(&mut errors, "password", &payload.password, is_update) {
        let password = payload.password.as_deref().unwrap();
        if password.chars().count() < PASSWORD_MIN {
            errors.push(format!("password must be at least {PASSWORD_MIN} characters"));
        }
    }

    errors
}

/// Minimal RFC-shape check: one `@`, non-empty local part, dotted domain.
fn is_email_shaped(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
        && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(username: &str, email: &str, password: &str) -> UserPayload {
        UserPayload {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            profile_image: None,
        }
    }

    #[test]
    fn valid_registration() {
        assert!(validate_user(&payload("ann_1", "ann@x.com", "Passw0rd"), false).is_empty());
    }

    #[test]
    fn create_requires_all_fields() {
        let empty = UserPayload {
            username: None,
            email: None,
            password: None,
            profile_image: None,
        };
        let errors = validate_user(&empty, false);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e == "username is required"));
        assert!(errors.iter().any(|e| e == "email is required"));
        assert!(errors.iter().any(|e| e == "password is required"));
    }

    #[test]
    fn update_allows_omitted_fields() {
        let empty = UserPayload {
            username: None,
            email: None,
            password: None,
            profile_image: None,
        };
        assert!(validate_user(&empty, true).is_empty());
    }

    #[test]
    fn update_still_checks_present_fields() {
        let mut p = payload("ab", "not-an-email", "short");
        p.profile_image = Some(None);
        let errors = validate_user(&p, true);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn username_length_bounds() {
        assert!(!validate_user(&payload("ab", "a@b.com", "Passw0rd"), false).is_empty());
        assert!(validate_user(&payload("abc", "a@b.com", "Passw0rd"), false).is_empty());
        let long = "a".repeat(51);
        assert!(!validate_user(&payload(&long, "a@b.com", "Passw0rd"), false).is_empty());
        let max = "a".repeat(50);
        assert!(validate_user(&payload(&max, "a@b.com", "Passw0rd"), false).is_empty());
    }

    #[test]
    fn username_charset() {
        assert!(validate_user(&payload("ann_1", "a@b.com", "Passw0rd"), false).is_empty());
        assert!(!validate_user(&payload("ann-1", "a@b.com", "Passw0rd"), false).is_empty());
        assert!(!validate_user(&payload("ann 1", "a@b.com", "Passw0rd"), false).is_empty());
    }

    #[test]
    fn email_shapes() {
        for bad in ["plain", "@x.com", "a@", "a@nodot", "a@.com", "a@x.com ", "a b@x.com"] {
            assert!(
                !validate_user(&payload("ann", bad, "Passw0rd"), false).is_empty(),
                "expected rejection for {bad:?}"
            );
        }
        assert!(validate_user(&payload("ann", "a.b@x.co.uk", "Passw0rd"), false).is_empty());
    }

    #[test]
    fn all_errors_accumulate() {
        let errors = validate_user(&payload("a!", "bad", "pw"), false);
        assert_eq!(errors.len(), 4);
    }
}
