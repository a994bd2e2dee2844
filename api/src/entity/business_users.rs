//! SeaORM Entity for business users

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "business_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub contact_person: String,
    /// Unique; the lookup key for orders and the phone endpoints
    #[sea_orm(unique)]
    pub phone: String,
    pub uploaded_file: Option<String>,
    pub referral_code: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cashback_amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
