use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::product::errors::PriceError;
use crate::product::errors::ProductIdError;
use crate::product::errors::ProductNameError;
use crate::user::models::UserId;

/// Product aggregate entity.
///
/// Every product is tagged with the identity that created it; that owner (or
/// an admin) is the only identity allowed to mutate or delete it.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: String,
    pub price: Price,
    pub owner_user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied product identifier.
///
/// Opaque to the service beyond uniqueness; validated to be non-empty and
/// bounded so it stays usable as a path segment and a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    const MAX_LENGTH: usize = 64;

    /// Create a validated product identifier.
    ///
    /// # Errors
    /// * `Empty` - Identifier is empty or whitespace-only
    /// * `TooLong` - Identifier longer than 64 characters
    pub fn new(id: String) -> Result<Self, ProductIdError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    const MAX_LENGTH: usize = 200;

    /// Create a validated product name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace-only
    /// * `TooLong` - Name longer than 200 characters
    pub fn new(name: String) -> Result<Self, ProductNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ProductNameError::Empty);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-negative product price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// Create a validated price.
    ///
    /// # Errors
    /// * `NotANumber` - Value is NaN or infinite
    /// * `Negative` - Value is below zero
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotANumber);
        }
        if value < 0.0 {
            return Err(PriceError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Command to create a new product with domain types
#[derive(Debug)]
pub struct CreateProductCommand {
    pub id: ProductId,
    pub name: ProductName,
    pub description: String,
    pub price: Price,
}

/// Command to replace a product's mutable fields.
///
/// All fields are required; the edit is a whole-record replacement applied
/// atomically, so a concurrent reader never observes a partial edit.
#[derive(Debug)]
pub struct UpdateProductCommand {
    pub name: ProductName,
    pub description: String,
    pub price: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_validation() {
        assert!(ProductId::new("p1".to_string()).is_ok());
        assert!(matches!(
            ProductId::new("  ".to_string()),
            Err(ProductIdError::Empty)
        ));
        assert!(matches!(
            ProductId::new("x".repeat(65)),
            Err(ProductIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_product_name_validation() {
        assert!(ProductName::new("Widget".to_string()).is_ok());
        assert!(matches!(
            ProductName::new("".to_string()),
            Err(ProductNameError::Empty)
        ));
    }

    #[test]
    fn test_price_validation() {
        assert_eq!(Price::new(9.99).unwrap().value(), 9.99);
        assert_eq!(Price::new(0.0).unwrap().value(), 0.0);
        assert!(matches!(Price::new(-0.01), Err(PriceError::Negative(_))));
        assert!(matches!(Price::new(f64::NAN), Err(PriceError::NotANumber)));
        assert!(matches!(
            Price::new(f64::INFINITY),
            Err(PriceError::NotANumber)
        ));
    }
}
