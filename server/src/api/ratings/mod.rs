pub mod create;
pub mod get;

use crate::AppState;
use axum::routing::get as get_route;
use axum::Router;
use utoipa::OpenApi;

/// Returns the rating routes, merged into the /api/recipes prefix.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/ratings",
        get_route(get::get_ratings).post(create::submit_rating),
    )
}

/// Mean of all current rating rows rounded to one decimal place, plus the
/// count. An unrated recipe aggregates to (0.0, 0).
pub(crate) fn aggregate(values: &[i32]) -> (f64, usize) {
    if values.is_empty() {
        return (0.0, 0);
    }

    let mean = values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64;
    ((mean * 10.0).round() / 10.0, values.len())
}

#[derive(OpenApi)]
#[openapi(
    paths(create::submit_rating, get::get_ratings),
    components(schemas(
        crate::validation::ratings::RatingPayload,
        create::SubmitRatingResponse,
        get::RatingAggregate,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregates_to_zero() {
        assert_eq!(aggregate(&[]), (0.0, 0));
    }

    #[test]
    fn single_value_is_its_own_mean() {
        assert_eq!(aggregate(&[3]), (3.0, 1));
    }

    #[test]
    fn mean_rounds_to_one_decimal() {
        assert_eq!(aggregate(&[5, 4]), (4.5, 2));
        assert_eq!(aggregate(&[1, 1, 2]), (1.3, 3));
        assert_eq!(aggregate(&[2, 3]), (2.5, 2));
        assert_eq!(aggregate(&[5, 5, 5, 4]), (4.8, 4));
    }
}
