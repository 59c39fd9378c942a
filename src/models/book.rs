use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "bookid")]
    pub id: i32,
    #[sea_orm(column_name = "categoryid")]
    pub category_id: i32,
    pub title: String,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    pub price: i32,
    #[sea_orm(column_name = "nopages")]
    pub page_count: Option<i32>,
    #[sea_orm(column_name = "bookdescription")]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::author_book::Entity")]
    AuthorBook,
    #[sea_orm(has_many = "super::ordering::Entity")]
    Ordering,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::author_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthorBook.def()
    }
}

impl Related<super::ordering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ordering.def()
    }
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        super::author_book::Relation::Author.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::author_book::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Flat book shape handed to clients.
///
/// Authors are collapsed into one comma-separated string and the category
/// into its description, so search, list and single reads all return the
/// same payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "bookID")]
    pub id: i32,
    #[serde(rename = "categoryID")]
    pub category_id: i32,
    pub title: String,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    pub price: i32,
    #[serde(rename = "noPages")]
    pub page_count: Option<i32>,
    #[serde(rename = "bookDescription")]
    pub description: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

impl Book {
    /// Project a stored book with its resolved authors and category.
    ///
    /// `authors` is taken in load order. An empty list or an unresolved
    /// category leaves the corresponding field empty.
    pub fn project(
        model: Model,
        authors: &[String],
        category: Option<&super::category::Model>,
    ) -> Self {
        let author = if authors.is_empty() {
            None
        } else {
            Some(authors.join(", "))
        };

        Self {
            id: model.id,
            category_id: model.category_id,
            title: model.title,
            isbn: model.isbn,
            year: model.year,
            price: model.price,
            page_count: model.page_count,
            description: model.description,
            author,
            category: category.map(|c| c.description.clone()),
        }
    }
}
