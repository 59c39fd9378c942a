//! SeaORM implementation of OrderingRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{DomainError, OrderingInput, OrderingRepository, Pagination};
use crate::infrastructure::unit_of_work::{
    atomically, require_book, require_customer, require_order,
};
use crate::models::ordering::{self, ActiveModel, Column, Entity as OrderingEntity};

pub struct SeaOrmOrderingRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderingRepository for SeaOrmOrderingRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<ordering::Model>, DomainError> {
        Ok(OrderingEntity::find()
            .order_by_asc(Column::OrderId)
            .order_by_asc(Column::BookId)
            .order_by_asc(Column::CustomerId)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?)
    }

    async fn create(&self, input: OrderingInput) -> Result<ordering::Model, DomainError> {
        let line = atomically(&self.db, "create_ordering", move |txn| {
            Box::pin(async move {
                require_book(txn, input.book_id).await?;
                require_order(txn, input.order_id).await?;
                require_customer(txn, input.customer_id).await?;

                let existing = OrderingEntity::find_by_id((
                    input.book_id,
                    input.order_id,
                    input.customer_id,
                ))
                .one(txn)
                .await?;
                if existing.is_some() {
                    return Err(DomainError::ConstraintViolation(format!(
                        "order {} already has a line for book {} and customer {}",
                        input.order_id, input.book_id, input.customer_id
                    )));
                }

                let line = ActiveModel {
                    book_id: Set(input.book_id),
                    order_id: Set(input.order_id),
                    customer_id: Set(input.customer_id),
                };
                Ok(line.insert(txn).await?)
            })
        })
        .await?;

        tracing::info!("Added book #{} to order #{}", line.book_id, line.order_id);
        Ok(line)
    }

    async fn delete(&self, key: OrderingInput) -> Result<bool, DomainError> {
        let result = OrderingEntity::delete_many()
            .filter(Column::BookId.eq(key.book_id))
            .filter(Column::OrderId.eq(key.order_id))
            .filter(Column::CustomerId.eq(key.customer_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
