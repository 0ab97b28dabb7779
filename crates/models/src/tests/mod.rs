
/// Insert / list / lookup against the real `users` schema
pub mod user_tests;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with migrations applied.
pub(crate) async fn migrated_db() -> anyhow::Result<DatabaseConnection> {
    let db = crate::db::connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
