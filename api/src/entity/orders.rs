//! SeaORM Entity for orders

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub business_user_id: i32,
    pub order_date: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_price: Decimal,
    #[sea_orm(column_type = "Text")]
    pub billing_address: String,
    /// Pending, Processing, Shipped, Delivered or Cancelled
    pub status: String,
    /// Online or Offline
    pub order_type: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cashback_applied: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::business_users::Entity",
        from = "Column::BusinessUserId",
        to = "super::business_users::Column::Id",
        on_delete = "Cascade"
    )]
    BusinessUsers,
    #[sea_orm(has_many = "super::order_products::Entity")]
    OrderProducts,
}

impl Related<super::business_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessUsers.def()
    }
}

impl Related<super::order_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
