use crate::{customer, invoice, revenue};
use crate::invoice::InvoiceStatus;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set};
use anyhow::Result;
use uuid::Uuid;

use super::setup_test_db;

async fn insert_customer(db: &sea_orm::DatabaseConnection, name: &str) -> Result<customer::Model> {
    let c = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(format!("{}@example.com", Uuid::new_v4())),
        image_url: Set("/customers/placeholder.png".to_string()),
    }
    .insert(db)
    .await?;
    Ok(c)
}

/// Test invoice create/update keeps id and date, and converts amounts
#[tokio::test]
async fn test_invoice_create_and_update() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let first = insert_customer(&db, "Crud First").await?;
    let second = insert_customer(&db, "Crud Second").await?;

    let created = invoice::create(&db, first.id, 1234, InvoiceStatus::Pending).await?;
    assert_eq!(created.amount, 1234);
    assert_eq!(created.status, InvoiceStatus::Pending);

    let updated = invoice::update(&db, created.id, second.id, 9900, InvoiceStatus::Paid).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.customer_id, second.id);
    assert_eq!(updated.amount, 9900);
    assert_eq!(updated.status, InvoiceStatus::Paid);

    // The invoice is reachable from its new customer
    let owned = second.find_related(invoice::Entity).all(&db).await?;
    assert!(owned.iter().any(|i| i.id == created.id));

    invoice::Entity::delete_by_id(created.id).exec(&db).await?;
    customer::Entity::delete_by_id(first.id).exec(&db).await?;
    customer::Entity::delete_by_id(second.id).exec(&db).await?;
    Ok(())
}

/// Updating a missing invoice reports not found
#[tokio::test]
async fn test_update_missing_invoice() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let c = insert_customer(&db, "Crud Missing").await?;
    let err = invoice::update(&db, Uuid::new_v4(), c.id, 100, InvoiceStatus::Paid).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::NotFound(_)));

    customer::Entity::delete_by_id(c.id).exec(&db).await?;
    Ok(())
}

/// Revenue rows read back verbatim
#[tokio::test]
async fn test_revenue_read() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let month = format!("T{}", &Uuid::new_v4().simple().to_string()[..3]);
    revenue::ActiveModel { month: Set(month.clone()), revenue: Set(4200) }.insert(&db).await?;
    let found = revenue::Entity::find_by_id(month.clone()).one(&db).await?.expect("revenue row");
    assert_eq!(found.revenue, 4200);

    revenue::Entity::delete_by_id(month).exec(&db).await?;
    Ok(())
}
