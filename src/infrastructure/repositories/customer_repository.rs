//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{CustomerInput, CustomerRepository, DomainError, Pagination};
use crate::models::customer::{self, ActiveModel, Column, Entity as CustomerEntity};

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<customer::Model>, DomainError> {
        Ok(CustomerEntity::find()
            .order_by_asc(Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<customer::Model>, DomainError> {
        Ok(CustomerEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CustomerInput) -> Result<customer::Model, DomainError> {
        input.validate()?;

        let customer = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            zip_code: Set(input.zip_code),
            city: Set(input.city),
            state: Set(input.state),
            address: Set(input.address),
            user: Set(input.user),
            password: Set(input.password),
            ..Default::default()
        };

        let result = customer.insert(&self.db).await?;
        tracing::info!("Created customer #{}", result.id);

        Ok(result)
    }

    async fn update(
        &self,
        id: i32,
        input: CustomerInput,
    ) -> Result<Option<customer::Model>, DomainError> {
        input.validate()?;

        let Some(existing) = CustomerEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.zip_code = Set(input.zip_code);
        active.city = Set(input.city);
        active.state = Set(input.state);
        active.address = Set(input.address);
        active.user = Set(input.user);
        active.password = Set(input.password);

        Ok(Some(active.update(&self.db).await?))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = CustomerEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!("Deleted customer #{}", id);
        }

        Ok(result.rows_affected > 0)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<customer::Model>, DomainError> {
        let candidate = CustomerEntity::find()
            .filter(Column::User.eq(username))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await?;

        // Plain equality; stored passwords are not hashed
        Ok(candidate.filter(|c| c.password.as_deref() == Some(password)))
    }
}
