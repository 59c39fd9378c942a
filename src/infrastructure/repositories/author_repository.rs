//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{AuthorInput, AuthorRepository, DomainError, Pagination};
use crate::infrastructure::unit_of_work::atomically;
use crate::models::author::{self, ActiveModel, Column, Entity as AuthorEntity};
use crate::models::author_book::{self, Entity as AuthorBookEntity};

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<author::Model>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok(authors)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<author::Model>, DomainError> {
        Ok(AuthorEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: AuthorInput) -> Result<author::Model, DomainError> {
        input.validate()?;

        let author = ActiveModel {
            name: Set(input.name),
            ..Default::default()
        };

        let result = author.insert(&self.db).await?;
        tracing::info!("Created author #{}", result.id);

        Ok(result)
    }

    async fn update(
        &self,
        id: i32,
        input: AuthorInput,
    ) -> Result<Option<author::Model>, DomainError> {
        input.validate()?;

        let Some(existing) = AuthorEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);

        Ok(Some(active.update(&self.db).await?))
    }

    /// Delete an author along with its book associations. The books stay.
    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let deleted = atomically(&self.db, "delete_author", move |txn| {
            Box::pin(async move {
                if AuthorEntity::find_by_id(id).one(txn).await?.is_none() {
                    return Ok(false);
                }

                let links = AuthorBookEntity::delete_many()
                    .filter(author_book::Column::AuthorId.eq(id))
                    .exec(txn)
                    .await?;
                AuthorEntity::delete_by_id(id).exec(txn).await?;

                tracing::debug!("Author #{}: unlinked {} books", id, links.rows_affected);
                Ok(true)
            })
        })
        .await?;

        if deleted {
            tracing::info!("Deleted author #{}", id);
        }
        Ok(deleted)
    }
}
