mod crud_tests;
mod transaction_tests;

use sea_orm::DatabaseConnection;

use crate::db::connect;
use migration::MigratorTrait;

/// Connect and migrate; `None` when no database is reachable so the suite
/// can run without one.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {e}");
        return None;
    }
    Some(db)
}
