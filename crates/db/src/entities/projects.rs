//! `SeaORM` Entity for the projects (emprendimientos) table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lots::Entity")]
    Lots,
    #[sea_orm(has_many = "super::stock_tickets::Entity")]
    StockTickets,
}

impl Related<super::lots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lots.def()
    }
}

impl Related<super::stock_tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockTickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
