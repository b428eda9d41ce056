use serde::Deserialize;
use utoipa::ToSchema;

use super::check_required;

pub const CONTENT_MAX: usize = 1000;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CommentPayload {
    pub content: Option<String>,
}

pub fn validate_comment(payload: &CommentPayload) -> Vec<String> {
    let mut errors = Vec::new();

    if !check_required(&mut errors, "content", &payload.content, false) {
        let content = payload.content.as_deref().unwrap();
        if content.trim().is_empty() {
            errors.push("content cannot be empty".to_string());
        } else if content.chars().count() > CONTENT_MAX {
            errors.push(format!("content must be {CONTENT_MAX} characters or fewer"));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(content: &str) -> CommentPayload {
        CommentPayload {
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn accepts_normal_comment() {
        assert!(validate_comment(&payload("Delicious, made it twice")).is_empty());
    }

    #[test]
    fn rejects_missing_and_blank() {
        assert_eq!(
            validate_comment(&CommentPayload { content: None }),
            vec!["content is required".to_string()]
        );
        assert_eq!(
            validate_comment(&payload("   \n\t ")),
            vec!["content cannot be empty".to_string()]
        );
    }

    #[test]
    fn length_cap_is_inclusive() {
        assert!(validate_comment(&payload(&"x".repeat(1000))).is_empty());
        assert_eq!(
            validate_comment(&payload(&"x".repeat(1001))),
            vec!["content must be 1000 characters or fewer".to_string()]
        );
    }
}
