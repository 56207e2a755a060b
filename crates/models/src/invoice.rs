use std::{fmt, str::FromStr};

use sea_orm::{entity::prelude::*, DatabaseConnection, DbErr, Set, Unchanged};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{customer, errors};

/// Payment state of an invoice. Stored as its lowercase name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(errors::ModelError::Validation(format!(
                "invalid status '{other}', expected 'pending' or 'paid'"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Minor currency units (cents).
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Parse a user-entered decimal amount such as `"12.50"`.
pub fn parse_amount(raw: &str) -> Result<f64, errors::ModelError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("amount required".into()));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| errors::ModelError::Validation(format!("amount '{trimmed}' is not a number")))?;
    if !value.is_finite() {
        return Err(errors::ModelError::Validation("amount must be a finite number".into()));
    }
    Ok(value)
}

/// Convert a major-unit amount to cents, rounding to the nearest cent.
pub fn to_minor_units(amount: f64) -> Result<i64, errors::ModelError> {
    let cents = (amount * 100.0).round();
    // i64::MAX is not exactly representable; the bound below is the largest safe f64
    if !cents.is_finite() || cents.abs() >= 9.2e18 {
        return Err(errors::ModelError::Validation("amount out of range".into()));
    }
    Ok(cents as i64)
}

pub fn to_major_units(minor_units: i64) -> f64 {
    minor_units as f64 / 100.0
}

/// Insert a new invoice stamped with the current time.
pub async fn create(
    db: &DatabaseConnection,
    customer_id: Uuid,
    amount: i64,
    status: InvoiceStatus,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        amount: Set(amount),
        status: Set(status),
        date: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite customer, amount and status of an existing invoice in one
/// `UPDATE`. `id` and `date` are left untouched.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    customer_id: Uuid,
    amount: i64,
    status: InvoiceStatus,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Unchanged(id),
        customer_id: Set(customer_id),
        amount: Set(amount),
        status: Set(status),
        ..Default::default()
    };
    match am.update(db).await {
        Ok(m) => Ok(m),
        Err(DbErr::RecordNotUpdated) => Err(errors::ModelError::NotFound("invoice not found".into())),
        Err(e) => Err(errors::ModelError::Db(e.to_string())),
    }
}
