use async_trait::async_trait;

use super::domain::User;
use super::errors::UserStoreError;

/// Persistence abstraction for user records.
///
/// Each call is a single atomic statement; implementations hold no
/// per-request state, so one instance is shared by all handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return it with its assigned id.
    /// Fails with `Conflict` when the email is already stored.
    async fn insert(&self, name: &str, email: &str) -> Result<User, UserStoreError>;
    async fn list_all(&self) -> Result<Vec<User>, UserStoreError>;
    async fn get_by_id(&self, id: i32) -> Result<User, UserStoreError>;
}

/// In-memory store for tests and doc examples
pub mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct InMemoryUserStore {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        users: Vec<User>,
        last_id: i32,
    }

    impl InMemoryUserStore {
        fn lock(&self) -> Result<MutexGuard<'_, Inner>, UserStoreError> {
            self.inner
                .lock()
                .map_err(|_| UserStoreError::Repository("user store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn insert(&self, name: &str, email: &str) -> Result<User, UserStoreError> {
            let mut inner = self.lock()?;
            if inner.users.iter().any(|u| u.email == email) {
                return Err(UserStoreError::Conflict { email: email.to_string() });
            }
            inner.last_id += 1;
            let user = User { id: inner.last_id, name: name.to_string(), email: email.to_string() };
            inner.users.push(user.clone());
            Ok(user)
        }

        async fn list_all(&self) -> Result<Vec<User>, UserStoreError> {
            Ok(self.lock()?.users.clone())
        }

        async fn get_by_id(&self, id: i32) -> Result<User, UserStoreError> {
            self.lock()?
                .users
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or(UserStoreError::NotFound(id))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn ids_are_never_reused() {
            let store = InMemoryUserStore::default();
            let a = store.insert("A", "a@example.com").await.unwrap();
            let b = store.insert("B", "b@example.com").await.unwrap();
            assert_eq!((a.id, b.id), (1, 2));
        }

        #[tokio::test]
        async fn duplicate_email_rejected_without_new_row() {
            let store = InMemoryUserStore::default();
            store.insert("A", "dup@example.com").await.unwrap();
            let err = store.insert("B", "dup@example.com").await.unwrap_err();
            assert!(matches!(err, UserStoreError::Conflict { ref email } if email == "dup@example.com"));
            assert_eq!(store.list_all().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn missing_id_is_not_found() {
            let store = InMemoryUserStore::default();
            assert!(matches!(store.get_by_id(3).await, Err(UserStoreError::NotFound(3))));
        }
    }
}
