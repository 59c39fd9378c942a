use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_order")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "orderid")]
    #[serde(rename = "orderID")]
    pub id: i32,
    #[sea_orm(column_name = "customerid")]
    #[serde(rename = "customerID")]
    pub customer_id: i32,
    #[sea_orm(column_name = "orderdate")]
    #[serde(rename = "orderDate")]
    pub order_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::ordering::Entity")]
    Ordering,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::ordering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ordering.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
