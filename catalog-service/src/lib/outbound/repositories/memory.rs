use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::product::errors::ProductError;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::ports::ProductRepository;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// In-memory credential store.
///
/// Backs the integration test harness and local development without a
/// database. A single `RwLock` over the map serializes every mutation, so
/// a record is always observed whole.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

/// In-memory product store with the same id-uniqueness and whole-record
/// write semantics as the Postgres adapter.
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.write().await;

        if products.contains_key(product.id.as_str()) {
            return Err(ProductError::AlreadyExists(product.id.to_string()));
        }

        products.insert(product.id.as_str().to_string(), product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.products.read().await.get(id.as_str()).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let mut products: Vec<Product> =
            self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.write().await;

        if !products.contains_key(product.id.as_str()) {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        products.insert(product.id.as_str().to_string(), product.clone());
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        self.products
            .write()
            .await
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::product::models::Price;
    use crate::product::models::ProductName;

    fn product(id: &str, owner: UserId) -> Product {
        Product {
            id: ProductId::new(id.to_string()).unwrap(),
            name: ProductName::new("Widget".to_string()).unwrap(),
            description: "A widget".to_string(),
            price: Price::new(9.99).unwrap(),
            owner_user_id: owner,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_product_id_is_conflict() {
        let repo = InMemoryProductRepository::new();
        let owner = UserId::new();

        repo.create(product("p1", owner)).await.unwrap();

        let result = repo.create(product("p1", UserId::new())).await;
        assert!(matches!(result, Err(ProductError::AlreadyExists(_))));

        // Original record untouched by the failed create
        let id = ProductId::new("p1".to_string()).unwrap();
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.owner_user_id, owner);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let repo = InMemoryProductRepository::new();
        repo.create(product("p1", UserId::new())).await.unwrap();

        let id = ProductId::new("p1".to_string()).unwrap();
        repo.delete(&id).await.unwrap();

        let result = repo.delete(&id).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(product("ghost", UserId::new())).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
