use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::invoice;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Invoice,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Invoice => Entity::has_many(invoice::Entity).into() }
    }
}

impl Related<invoice::Entity> for Entity {
    fn to() -> RelationDef { Relation::Invoice.def() }
}

impl ActiveModelBehavior for ActiveModel {}
