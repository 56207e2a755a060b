#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use migration::MigratorTrait;
use models::{customer, db::{connect_with_config, DatabaseConfig}};
use uuid::Uuid;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Fresh connection to a migrated database, or `None` when tests should skip.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let cfg = test_config();

    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::from_env();
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = 1;
    cfg.acquire_timeout_secs = 10;
    cfg
}

pub async fn insert_customer(db: &DatabaseConnection, name: &str) -> Result<customer::Model, anyhow::Error> {
    let suffix = Uuid::new_v4().simple().to_string();
    let c = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("{name} {suffix}")),
        email: Set(format!("{suffix}@example.com")),
        image_url: Set("/customers/placeholder.png".into()),
    }
    .insert(db)
    .await?;
    Ok(c)
}
