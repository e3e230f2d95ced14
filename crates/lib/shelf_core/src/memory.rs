//! In-memory store implementations.
//!
//! Used by unit tests here and, through the `test-utils` feature, by the
//! router tests of downstream crates:
//!
//! ```toml
//! [dev-dependencies]
//! shelf_core = { workspace = true, features = ["test-utils"] }
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::auth::AuthError;
use crate::auth::queries::UserStore;
use crate::models::auth::{User, UserWithPassword};
use crate::models::product::{NewProduct, Product};
use crate::products::queries::ProductStore;
use crate::products::{Page, ProductError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ===== MemoryUserStore =====

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: Vec<UserWithPassword>,
}

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    table: Arc<Mutex<UserTable>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        let mut table = lock(&self.table);
        if table.rows.iter().any(|row| row.user.username == username) {
            return Err(AuthError::Conflict(username.to_string()));
        }
        table.next_id += 1;
        let user = User {
            id: table.next_id,
            username: username.to_string(),
        };
        table.rows.push(UserWithPassword {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, AuthError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|row| row.user.username == username)
            .cloned())
    }
}

// ===== MemoryProductStore =====

#[derive(Default)]
struct ProductTable {
    next_id: i64,
    rows: BTreeMap<i64, Product>,
}

#[derive(Clone, Default)]
pub struct MemoryProductStore {
    table: Arc<Mutex<ProductTable>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        let mut table = lock(&self.table);
        table.next_id += 1;
        let stored = Product::from_new(table.next_id, product);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, ProductError> {
        let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        Ok(lock(&self.table)
            .rows
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Product, ProductError> {
        lock(&self.table)
            .rows
            .get(&id)
            .cloned()
            .ok_or(ProductError::NotFound(id))
    }

    async fn update(&self, id: i64, product: NewProduct) -> Result<Product, ProductError> {
        let mut table = lock(&self.table);
        let slot = table.rows.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        *slot = Product::from_new(id, product);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ProductError> {
        lock(&self.table)
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(ProductError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, price: f64) -> NewProduct {
        NewProduct {
            title: title.to_string(),
            description: format!("{title} description"),
            price,
        }
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let users = MemoryUserStore::new();
        users.create_user("testuser", "hash").await.expect("first");
        let second = users.create_user("testuser", "other").await;
        assert!(matches!(second, Err(AuthError::Conflict(name)) if name == "testuser"));
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn users_get_distinct_ids_and_exact_lookup() {
        let users = MemoryUserStore::new();
        let a = users.create_user("alice", "h1").await.expect("alice");
        let b = users.create_user("bob", "h2").await.expect("bob");
        assert_ne!(a.id, b.id);

        let found = users
            .find_by_username("bob")
            .await
            .expect("lookup")
            .expect("bob exists");
        assert_eq!(found.user, b);
        assert_eq!(found.password_hash, "h2");
        assert!(users.find_by_username("Bob").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let products = MemoryProductStore::new();
        let created = products
            .create(NewProduct {
                title: "T".into(),
                description: "D".into(),
                price: 9.99,
            })
            .await
            .expect("create");
        let fetched = products.get(created.id).await.expect("get");
        assert_eq!(created, fetched);
        assert_eq!(fetched.title, "T");
        assert_eq!(fetched.description, "D");
        assert_eq!(fetched.price, 9.99);
    }

    #[tokio::test]
    async fn list_respects_skip_and_limit_in_id_order() {
        let products = MemoryProductStore::new();
        for (i, title) in ["one", "two", "three"].iter().enumerate() {
            products
                .create(sample(title, i as f64))
                .await
                .expect("create");
        }

        let first = products.list(Page::new(0, 1).expect("page")).await.expect("list");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "one");

        let rest = products.list(Page::new(1, 2).expect("page")).await.expect("list");
        let titles: Vec<&str> = rest.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["two", "three"]);

        let past_end = products.list(Page::new(5, 10).expect("page")).await.expect("list");
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_is_idempotent() {
        let products = MemoryProductStore::new();
        let created = products.create(sample("old", 1.0)).await.expect("create");

        let once = products
            .update(created.id, sample("new", 2.5))
            .await
            .expect("update");
        let twice = products
            .update(created.id, sample("new", 2.5))
            .await
            .expect("update again");
        assert_eq!(once, twice);
        assert_eq!(products.get(created.id).await.expect("get"), once);
        assert_eq!(once.title, "new");
        assert_eq!(once.price, 2.5);
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let products = MemoryProductStore::new();
        let result = products.update(999, sample("x", 1.0)).await;
        assert!(matches!(result, Err(ProductError::NotFound(999))));
    }

    #[tokio::test]
    async fn delete_succeeds_once() {
        let products = MemoryProductStore::new();
        let created = products.create(sample("gone", 1.0)).await.expect("create");

        products.delete(created.id).await.expect("first delete");
        assert!(matches!(
            products.delete(created.id).await,
            Err(ProductError::NotFound(_))
        ));
        assert!(matches!(
            products.get(created.id).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let products = MemoryProductStore::new();
        let a = products.create(sample("a", 1.0)).await.expect("create");
        products.delete(a.id).await.expect("delete");
        let b = products.create(sample("b", 1.0)).await.expect("create");
        assert!(b.id > a.id);
    }
}
