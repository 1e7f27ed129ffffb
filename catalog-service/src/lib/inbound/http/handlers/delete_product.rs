use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::models::ProductId;
use crate::user::models::Identity;

/// Delete a product.
///
/// Deletion is owner-or-admin only. A second delete of the same id reports
/// 404 rather than silently succeeding.
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<DeleteProductResponseData>, ApiError> {
    let id = ProductId::new(product_id).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state.product_service.delete_product(&identity, &id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteProductResponseData {
            id: id.to_string(),
            deleted: true,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteProductResponseData {
    pub id: String,
    pub deleted: bool,
}
