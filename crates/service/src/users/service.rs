use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{NewUser, User};
use super::errors::UserStoreError;
use super::repository::UserStore;

/// User workflows independent of the web framework.
pub struct UserService<S: UserStore + ?Sized> {
    store: Arc<S>,
}

impl<S: UserStore + ?Sized> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: UserStore + ?Sized> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a user; only shape has been checked by the caller.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::users::{domain::NewUser, repository::memory::InMemoryUserStore, UserService};
    /// let svc = UserService::new(Arc::new(InMemoryUserStore::default()));
    /// let input = NewUser { name: "Alice".into(), email: "alice@example.com".into() };
    /// let user = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(user.id, 1);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: NewUser) -> Result<User, UserStoreError> {
        match self.store.insert(&input.name, &input.email).await {
            Ok(user) => {
                info!(user_id = user.id, "user_created");
                Ok(user)
            }
            Err(e @ UserStoreError::Conflict { .. }) => {
                warn!(code = e.code(), "duplicate email rejected");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.store.list_all().await?;
        debug!(count = users.len(), "users listed");
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<User, UserStoreError> {
        self.store.get_by_id(id).await
    }
}
