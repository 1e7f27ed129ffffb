use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::product::errors::ProductError;
use crate::product::models::CreateProductCommand;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::models::UpdateProductCommand;
use crate::product::ports::ProductRepository;
use crate::product::ports::ProductServicePort;
use crate::user::models::Identity;

/// Domain service implementation for product operations.
///
/// Holds the ownership check: the resolved request identity must be the
/// product's owner or an admin for any mutation. The check runs here, after
/// the gates, because it needs the stored record.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    /// Create a new product service with an injected repository.
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    fn ensure_owner_or_admin(identity: &Identity, product: &Product) -> Result<(), ProductError> {
        if identity.user_id == product.owner_user_id || identity.is_admin() {
            Ok(())
        } else {
            Err(ProductError::NotOwner)
        }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(
        &self,
        identity: &Identity,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        let product = Product {
            id: command.id,
            name: command.name,
            description: command.description,
            price: command.price,
            owner_user_id: identity.user_id,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create(product).await?;

        tracing::info!(
            product_id = %created.id,
            owner_user_id = %created.owner_user_id,
            "Product created"
        );

        Ok(created)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        // Full catalog for any authenticated caller; only writes are
        // owner-restricted.
        self.repository.list_all().await
    }

    async fn update_product(
        &self,
        identity: &Identity,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        Self::ensure_owner_or_admin(identity, &product)?;

        product.name = command.name;
        product.description = command.description;
        product.price = command.price;
        product.updated_at = Some(Utc::now());

        let updated = self.repository.update(product).await?;

        tracing::info!(
            product_id = %updated.id,
            actor = %identity.user_id,
            "Product updated"
        );

        Ok(updated)
    }

    async fn delete_product(
        &self,
        identity: &Identity,
        id: &ProductId,
    ) -> Result<(), ProductError> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        Self::ensure_owner_or_admin(identity, &product)?;

        self.repository.delete(id).await?;

        tracing::info!(
            product_id = %id,
            actor = %identity.user_id,
            "Product deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::product::models::Price;
    use crate::product::models::ProductName;
    use crate::user::models::Role;
    use crate::user::models::UserId;

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn create(&self, product: Product) -> Result<Product, ProductError>;
            async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;
            async fn list_all(&self) -> Result<Vec<Product>, ProductError>;
            async fn update(&self, product: Product) -> Result<Product, ProductError>;
            async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
        }
    }

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: UserId::new(),
            role,
        }
    }

    fn stored_product(owner: UserId) -> Product {
        Product {
            id: ProductId::new("p1".to_string()).unwrap(),
            name: ProductName::new("Widget".to_string()).unwrap(),
            description: "A widget".to_string(),
            price: Price::new(9.99).unwrap(),
            owner_user_id: owner,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn update_command() -> UpdateProductCommand {
        UpdateProductCommand {
            name: ProductName::new("Gadget".to_string()).unwrap(),
            description: "Now a gadget".to_string(),
            price: Price::new(19.99).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_product_sets_owner() {
        let caller = identity(Role::Customer);
        let caller_id = caller.user_id;

        let mut repository = MockTestProductRepository::new();
        repository
            .expect_create()
            .withf(move |product| {
                product.owner_user_id == caller_id && product.id.as_str() == "p1"
            })
            .times(1)
            .returning(|product| Ok(product));

        let service = ProductService::new(Arc::new(repository));

        let command = CreateProductCommand {
            id: ProductId::new("p1".to_string()).unwrap(),
            name: ProductName::new("Widget".to_string()).unwrap(),
            description: "A widget".to_string(),
            price: Price::new(9.99).unwrap(),
        };

        let product = service
            .create_product(&caller, command)
            .await
            .expect("Create failed");
        assert_eq!(product.owner_user_id, caller_id);
    }

    #[tokio::test]
    async fn test_create_product_duplicate_id() {
        let mut repository = MockTestProductRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|product| Err(ProductError::AlreadyExists(product.id.to_string())));

        let service = ProductService::new(Arc::new(repository));

        let command = CreateProductCommand {
            id: ProductId::new("p1".to_string()).unwrap(),
            name: ProductName::new("Widget".to_string()).unwrap(),
            description: "A widget".to_string(),
            price: Price::new(9.99).unwrap(),
        };

        let result = service.create_product(&identity(Role::Customer), command).await;
        assert!(matches!(
            result.unwrap_err(),
            ProductError::AlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_update_by_owner_succeeds() {
        let owner = identity(Role::Customer);
        let owner_id = owner.user_id;

        let mut repository = MockTestProductRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored_product(owner_id))));
        repository
            .expect_update()
            .withf(|product| {
                product.name.as_str() == "Gadget" && product.updated_at.is_some()
            })
            .times(1)
            .returning(|product| Ok(product));

        let service = ProductService::new(Arc::new(repository));

        let id = ProductId::new("p1".to_string()).unwrap();
        let updated = service
            .update_product(&owner, &id, update_command())
            .await
            .expect("Update failed");
        assert_eq!(updated.price.value(), 19.99);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let owner_id = UserId::new();

        let mut repository = MockTestProductRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored_product(owner_id))));
        repository.expect_update().times(0);

        let service = ProductService::new(Arc::new(repository));

        let id = ProductId::new("p1".to_string()).unwrap();
        let result = service
            .update_product(&identity(Role::Customer), &id, update_command())
            .await;
        assert!(matches!(result.unwrap_err(), ProductError::NotOwner));
    }

    #[tokio::test]
    async fn test_update_by_admin_succeeds() {
        let owner_id = UserId::new();

        let mut repository = MockTestProductRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored_product(owner_id))));
        repository
            .expect_update()
            .times(1)
            .returning(|product| Ok(product));

        let service = ProductService::new(Arc::new(repository));

        let id = ProductId::new("p1".to_string()).unwrap();
        let result = service
            .update_product(&identity(Role::Admin), &id, update_command())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let mut repository = MockTestProductRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = ProductService::new(Arc::new(repository));

        let id = ProductId::new("ghost".to_string()).unwrap();
        let result = service
            .update_product(&identity(Role::Admin), &id, update_command())
            .await;
        assert!(matches!(result.unwrap_err(), ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_forbidden() {
        let owner_id = UserId::new();

        let mut repository = MockTestProductRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored_product(owner_id))));
        repository.expect_delete().times(0);

        let service = ProductService::new(Arc::new(repository));

        let id = ProductId::new("p1".to_string()).unwrap();
        let result = service
            .delete_product(&identity(Role::Customer), &id)
            .await;
        assert!(matches!(result.unwrap_err(), ProductError::NotOwner));
    }

    #[tokio::test]
    async fn test_delete_by_owner_succeeds() {
        let owner = identity(Role::Customer);
        let owner_id = owner.user_id;

        let mut repository = MockTestProductRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored_product(owner_id))));
        repository
            .expect_delete()
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(Arc::new(repository));

        let id = ProductId::new("p1".to_string()).unwrap();
        assert!(service.delete_product(&owner, &id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let mut repository = MockTestProductRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = ProductService::new(Arc::new(repository));

        let id = ProductId::new("ghost".to_string()).unwrap();
        let result = service.delete_product(&identity(Role::Admin), &id).await;
        assert!(matches!(result.unwrap_err(), ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_is_not_owner_filtered() {
        let mut repository = MockTestProductRepository::new();
        repository.expect_list_all().times(1).returning(|| {
            Ok(vec![
                stored_product(UserId::new()),
                stored_product(UserId::new()),
            ])
        });

        let service = ProductService::new(Arc::new(repository));

        let products = service.list_products().await.expect("List failed");
        assert_eq!(products.len(), 2);
    }
}
