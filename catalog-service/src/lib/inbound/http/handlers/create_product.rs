use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::product::errors::PriceError;
use crate::product::errors::ProductIdError;
use crate::product::errors::ProductNameError;
use crate::product::models::CreateProductCommand;
use crate::product::models::Price;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::models::ProductName;
use crate::user::models::Identity;

/// Create a product owned by the calling identity.
pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    state
        .product_service
        .create_product(&identity, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    id: String,
    name: String,
    description: String,
    price: f64,
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseProductRequestError {
    #[error("Invalid product id: {0}")]
    Id(#[from] ProductIdError),

    #[error("Invalid product name: {0}")]
    Name(#[from] ProductNameError),

    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ParseProductRequestError> {
        let id = ProductId::new(self.id)?;
        let name = ProductName::new(self.name)?;
        let price = Price::new(self.price)?;
        Ok(CreateProductCommand {
            id,
            name,
            description: self.description,
            price,
        })
    }
}

impl From<ParseProductRequestError> for ApiError {
    fn from(err: ParseProductRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.as_str().to_string(),
            description: product.description.clone(),
            price: product.price.value(),
            owner_user_id: product.owner_user_id.to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
