//! `SeaORM` Entity for the contracts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub lot_id: Uuid,
    pub base_price: Decimal,
    pub down_payment: Decimal,
    pub upfront_cash: Decimal,
    pub installment_count: i32,
    pub monthly_amount: Decimal,
    pub start_date: Option<Date>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(
        belongs_to = "super::lots::Entity",
        from = "Column::LotId",
        to = "super::lots::Column::Id"
    )]
    Lots,
    #[sea_orm(has_many = "super::contracted_services::Entity")]
    ContractedServices,
    #[sea_orm(has_many = "super::loans::Entity")]
    Loans,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::lots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lots.def()
    }
}

impl Related<super::contracted_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContractedServices.def()
    }
}

impl Related<super::loans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
