use async_trait::async_trait;

use crate::product::errors::ProductError;
use crate::product::models::CreateProductCommand;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::models::UpdateProductCommand;
use crate::user::models::Identity;

/// Port for product domain service operations.
///
/// Mutations enforce ownership: only the creator of a product or an admin may
/// update or delete it. Reads are not owner-filtered; any authenticated
/// identity sees the full catalog.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Create a new product owned by the calling identity.
    ///
    /// # Errors
    /// * `AlreadyExists` - A product with the caller-supplied id exists
    /// * `DatabaseError` - Database operation failed
    async fn create_product(
        &self,
        identity: &Identity,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Retrieve a single product by id.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// Retrieve the full catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// Replace a product's mutable fields.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `NotOwner` - Caller is neither the owner nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        identity: &Identity,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Delete a product.
    ///
    /// Deleting an id that no longer exists fails with `NotFound`; a repeated
    /// delete is never reported as success.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `NotOwner` - Caller is neither the owner nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, identity: &Identity, id: &ProductId)
        -> Result<(), ProductError>;
}

/// Persistence operations for the product aggregate.
///
/// Each write is a single whole-record operation against the store; partial
/// field application is never observable.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Persist a new product.
    ///
    /// # Errors
    /// * `AlreadyExists` - A product with the same id exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    /// Retrieve a product by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Retrieve all products.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// Replace an existing product record.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// Remove a product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
}
