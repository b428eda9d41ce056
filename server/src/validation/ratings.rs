use serde::Deserialize;
use utoipa::ToSchema;

use super::check_required;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RatingPayload {
    pub rating: Option<i32>,
}

pub fn validate_rating(payload: &RatingPayload) -> Vec<String> {
    let mut errors = Vec::new();

    if !check_required(&mut errors, "rating", &payload.rating, false) {
        let rating = payload.rating.unwrap();
        if !(1..=5).contains(&rating) {
            errors.push("rating must be an integer between 1 and 5".to_string());
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range() {
        for r in 1..=5 {
            assert!(validate_rating(&RatingPayload { rating: Some(r) }).is_empty());
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for r in [0, 6, -1, 100] {
            assert_eq!(
                validate_rating(&RatingPayload { rating: Some(r) }),
                vec!["rating must be an integer between 1 and 5".to_string()]
            );
        }
    }

    #[test]
    fn rejects_missing() {
        assert_eq!(
            validate_rating(&RatingPayload { rating: None }),
            vec!["rating is required".to_string()]
        );
    }
}
