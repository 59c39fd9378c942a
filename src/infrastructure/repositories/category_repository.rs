//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
};

use crate::domain::{CategoryInput, CategoryRepository, DomainError, Pagination};
use crate::models::category::{self, ActiveModel, Column, Entity as CategoryEntity};

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<category::Model>, DomainError> {
        Ok(CategoryEntity::find()
            .order_by_asc(Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, DomainError> {
        Ok(CategoryEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CategoryInput) -> Result<category::Model, DomainError> {
        input.validate()?;

        let category = ActiveModel {
            description: Set(input.description),
            ..Default::default()
        };

        let result = category.insert(&self.db).await?;
        tracing::info!("Created category #{}", result.id);

        Ok(result)
    }

    async fn update(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> Result<Option<category::Model>, DomainError> {
        input.validate()?;

        let Some(existing) = CategoryEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.description = Set(input.description);

        Ok(Some(active.update(&self.db).await?))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = CategoryEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!("Deleted category #{}", id);
        }

        Ok(result.rows_affected > 0)
    }
}
