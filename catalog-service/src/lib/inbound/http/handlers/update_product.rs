use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::create_product::ParseProductRequestError;
use super::create_product::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::models::Price;
use crate::product::models::ProductId;
use crate::product::models::ProductName;
use crate::product::models::UpdateProductCommand;
use crate::user::models::Identity;

/// Replace a product's mutable fields.
///
/// The edit is a full replacement: all three fields are required, and they
/// land in storage as one atomic write. Only the owner or an admin gets past
/// the service's ownership check.
pub async fn update_product(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let id = ProductId::new(product_id).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .product_service
        .update_product(&identity, &id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

/// HTTP request body for editing a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateProductRequest {
    name: String,
    description: String,
    price: f64,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ParseProductRequestError> {
        let name = ProductName::new(self.name)?;
        let price = Price::new(self.price)?;
        Ok(UpdateProductCommand {
            name,
            description: self.description,
            price,
        })
    }
}
