#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Connect and migrate for integration tests; `None` means the test should
/// skip (no reachable database or SKIP_DB_TESTS set).
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match models::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}
