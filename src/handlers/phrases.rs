// Phrase handlers
// HTTP handlers for the category and phrase read endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{db::Database, error::ApiError, models::phrase::PhraseSummary};

/// Body returned when a category holds no phrases. By contract this travels
/// as a 200 payload with an `error` key, not as an HTTP error status, so
/// clients branch on payload shape.
pub const NO_PHRASES_ERROR: &str = "no phrases for this course";

fn no_phrases_response() -> Response {
    (StatusCode::OK, Json(json!({ "error": NO_PHRASES_ERROR }))).into_response()
}

/// List the known lesson categories
/// GET /categories
///
/// The store is queried for its distinct category values, but the response
/// is always the fixed three-entry display map: a fourth category inserted
/// directly into the table will not appear here. Clients depend on this
/// shape, so the stored values are only logged.
pub async fn get_categories(
    State(db): State<Arc<Database>>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = db.distinct_categories().await?;
    debug!("Store currently holds {} distinct categories", stored.len());

    Ok((
        StatusCode::OK,
        Json(json!({
            "greeting": "Everyday greetings",
            "introduction": "Self-introduction",
            "thanks": "Thanks and apologies"
        })),
    ))
}

/// List all phrases in a category
/// GET /phrases/:category
/// Rows are returned without their category field (it is already in the URL).
pub async fn get_phrases_by_category(
    State(db): State<Arc<Database>>,
    Path(category): Path<String>,
) -> Result<Response, ApiError> {
    info!("Listing phrases for category: {}", category);

    let phrases = db.list_by_category(&category).await?;
    if phrases.is_empty() {
        debug!("No phrases stored for category: {}", category);
        return Ok(no_phrases_response());
    }

    let summaries: Vec<PhraseSummary> = phrases.into_iter().map(PhraseSummary::from).collect();

    info!("Retrieved {} phrases for category: {}", summaries.len(), category);
    Ok((StatusCode::OK, Json(summaries)).into_response())
}

/// Fetch one random phrase from a category
/// GET /get_phrase/:category
/// The full record, category included, is returned.
pub async fn get_random_phrase(
    State(db): State<Arc<Database>>,
    Path(category): Path<String>,
) -> Result<Response, ApiError> {
    info!("Fetching random phrase for category: {}", category);

    match db.pick_random(&category).await? {
        Some(phrase) => {
            info!("Selected phrase {} from category: {}", phrase.id, category);
            Ok((StatusCode::OK, Json(phrase)).into_response())
        }
        None => {
            debug!("No phrases stored for category: {}", category);
            Ok(no_phrases_response())
        }
    }
}
