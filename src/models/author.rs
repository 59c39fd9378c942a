use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "authorid")]
    #[serde(rename = "authorID")]
    pub id: i32,
    #[sea_orm(column_name = "authorname")]
    #[serde(rename = "authorName")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::author_book::Entity")]
    AuthorBook,
}

impl Related<super::author_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthorBook.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::author_book::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::author_book::Relation::Author.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
