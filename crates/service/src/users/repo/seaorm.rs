use sea_orm::DatabaseConnection;

use models::errors::ModelError;

use crate::users::domain::User;
use crate::users::errors::UserStoreError;
use crate::users::repository::UserStore;

/// `UserStore` over a SeaORM connection pool.
///
/// Every operation checks a connection out of the pool for one statement;
/// the pool takes it back when the query future completes or is dropped.
#[derive(Clone)]
pub struct SeaOrmUserStore {
    pub db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn repo_err(e: ModelError) -> UserStoreError {
    UserStoreError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl UserStore for SeaOrmUserStore {
    async fn insert(&self, name: &str, email: &str) -> Result<User, UserStoreError> {
        match models::user::create(&self.db, name, email).await {
            Ok(m) => Ok(m.into()),
            Err(ModelError::Conflict(_)) => Err(UserStoreError::Conflict { email: email.to_string() }),
            Err(e) => Err(repo_err(e)),
        }
    }

    async fn list_all(&self) -> Result<Vec<User>, UserStoreError> {
        let rows = models::user::list_all(&self.db).await.map_err(repo_err)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<User, UserStoreError> {
        models::user::find_by_id(&self.db, id)
            .await
            .map_err(repo_err)?
            .map(User::from)
            .ok_or(UserStoreError::NotFound(id))
    }
}
