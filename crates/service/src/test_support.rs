use sea_orm::DatabaseConnection;

use migration::MigratorTrait;

/// Connect and migrate; `None` when no database is reachable so the suite
/// can run without one.
pub(crate) async fn try_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match models::db::connect().await {
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

/// Unique-ish suffix so scenario fixtures do not collide across runs.
pub(crate) fn run_tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
