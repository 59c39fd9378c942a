use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "customerid")]
    #[serde(rename = "customerID")]
    pub id: i32,
    #[sea_orm(column_name = "firstname")]
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[sea_orm(column_name = "lastname")]
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[sea_orm(column_name = "zipcode")]
    #[serde(rename = "zipCode")]
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book_order::Entity")]
    BookOrder,
}

impl Related<super::book_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Login response: everything but the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOut {
    #[serde(rename = "customerID")]
    pub id: i32,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "zipCode")]
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub user: Option<String>,
}

impl From<Model> for CustomerOut {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            zip_code: model.zip_code,
            city: model.city,
            state: model.state,
            address: model.address,
            user: model.user,
        }
    }
}
