//! Order lines. The customer id is copied from the owning order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ordering")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "bookid")]
    #[serde(rename = "bookID")]
    pub book_id: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "orderid")]
    #[serde(rename = "orderID")]
    pub order_id: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "customerid")]
    #[serde(rename = "customerid")]
    pub customer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::book_order::Entity",
        from = "Column::OrderId",
        to = "super::book_order::Column::Id"
    )]
    BookOrder,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::book_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
