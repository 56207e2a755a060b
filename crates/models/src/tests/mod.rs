
/// CRUD operations tests for the invoice entities
pub mod crud_tests;

/// Connect and migrate, or `None` when no database is configured.
pub(crate) async fn setup_test_db() -> anyhow::Result<Option<sea_orm::DatabaseConnection>> {
    use migration::MigratorTrait;

    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: SKIP_DB_TESTS set or DATABASE_URL missing");
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
