use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::models::idea;
use crate::store::IdeaStore;

/// GET /api/status-counts
/// Unfiltered idea counts per status, as shown on the listing tabs.
pub async fn status_counts(store: web::Data<dyn IdeaStore>) -> Result<HttpResponse, AppError> {
    let counts = idea::status_counts(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status_counts": counts })))
}
