//! `SeaORM` Entity for the service catalog table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub base_price: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contracted_services::Entity")]
    ContractedServices,
}

impl Related<super::contracted_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContractedServices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
