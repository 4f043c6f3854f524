use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert and return the record with its generated id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Every record, in storage order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Persist all fields of an existing record
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

/// In-memory implementation of ProductRepository (for development/testing).
/// Ids start at 1 and are never reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let product = Product {
            id,
            name: Some(input.name),
            description: input.description,
            price: Some(input.price),
            quantity: Some(input.quantity),
            image: input.image,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn update(&self, mut product: Product) -> ProductResult<Product> {
        let mut table = self.table.write().await;

        let row = table
            .rows
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;

        product.created_at = row.created_at;
        product.updated_at = Utc::now();
        *row = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut table = self.table.write().await;

        if table.rows.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> NewProduct {
        NewProduct {
            name: "Pen".to_string(),
            description: None,
            price: 10.0,
            quantity: 5,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_are_not_reused() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(pen()).await.unwrap();
        assert_eq!(first.id, 1);

        assert!(repo.delete(1).await.unwrap());
        let second = repo.create(pen()).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        let repo = InMemoryProductRepository::new();
        for _ in 0..3 {
            repo.create(pen()).await.unwrap();
        }

        let ids: Vec<i32> = repo.find_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let repo = InMemoryProductRepository::new();
        let mut product = repo.create(pen()).await.unwrap();
        product.id = 99;

        let result = repo.update(product).await;
        assert!(matches!(result, Err(ProductError::NotFound(99))));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(pen()).await.unwrap();

        let mut changed = created.clone();
        changed.name = None;
        changed.created_at = Utc::now() + chrono::Duration::days(1);

        let updated = repo.update(changed).await.unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, None);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = InMemoryProductRepository::new();
        assert!(!repo.delete(1).await.unwrap());
    }
}
