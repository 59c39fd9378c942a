//! SeaORM implementation of OrderRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::{
    CustomerOrder, DomainError, OrderInput, OrderItem, OrderRepository, Pagination,
};
use crate::infrastructure::unit_of_work::{atomically, require_book, require_customer};
use crate::models::book;
use crate::models::book_order::{self, ActiveModel, Column, Entity as OrderEntity};
use crate::models::ordering::{self, Entity as OrderingEntity};

pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// One row of the order → line → book join. Book columns are empty for
/// orders without lines.
#[derive(Debug, FromQueryResult)]
struct OrderLineRow {
    order_id: i32,
    title: Option<String>,
    price: Option<i32>,
}

/// Fold join rows (sorted by order id) into one group per order.
fn group_lines(rows: Vec<OrderLineRow>) -> Vec<CustomerOrder> {
    let mut orders: Vec<CustomerOrder> = Vec::new();

    for row in rows {
        if orders.last().map(|o| o.order_id) != Some(row.order_id) {
            orders.push(CustomerOrder {
                order_id: row.order_id,
                items: Vec::new(),
            });
        }

        if let (Some(title), Some(price)) = (row.title, row.price)
            && let Some(group) = orders.last_mut()
        {
            group.items.push(OrderItem { title, price });
        }
    }

    orders
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<book_order::Model>, DomainError> {
        Ok(OrderEntity::find()
            .order_by_asc(Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<book_order::Model>, DomainError> {
        Ok(OrderEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: OrderInput) -> Result<book_order::Model, DomainError> {
        let order = atomically(&self.db, "create_order", move |txn| {
            Box::pin(async move {
                require_customer(txn, input.customer_id).await?;

                let order = ActiveModel {
                    customer_id: Set(input.customer_id),
                    order_date: Set(input.order_date),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                let mut book_ids = input.book_ids;
                book_ids.sort_unstable();
                book_ids.dedup();

                for book_id in book_ids {
                    require_book(txn, book_id).await?;
                    ordering::ActiveModel {
                        book_id: Set(book_id),
                        order_id: Set(order.id),
                        customer_id: Set(order.customer_id),
                    }
                    .insert(txn)
                    .await?;
                }

                Ok(order)
            })
        })
        .await?;

        tracing::info!(
            "Created order #{} for customer #{}",
            order.id,
            order.customer_id
        );
        Ok(order)
    }

    async fn update(
        &self,
        id: i32,
        input: OrderInput,
    ) -> Result<Option<book_order::Model>, DomainError> {
        atomically(&self.db, "update_order", move |txn| {
            Box::pin(async move {
                let Some(existing) = OrderEntity::find_by_id(id).one(txn).await? else {
                    return Ok(None);
                };
                require_customer(txn, input.customer_id).await?;

                let mut active: ActiveModel = existing.into();
                active.customer_id = Set(input.customer_id);
                active.order_date = Set(input.order_date);

                Ok(Some(active.update(txn).await?))
            })
        })
        .await
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let deleted = atomically(&self.db, "delete_order", move |txn| {
            Box::pin(async move {
                if OrderEntity::find_by_id(id).one(txn).await?.is_none() {
                    return Ok(false);
                }

                let lines = OrderingEntity::delete_many()
                    .filter(ordering::Column::OrderId.eq(id))
                    .exec(txn)
                    .await?;
                OrderEntity::delete_by_id(id).exec(txn).await?;

                tracing::debug!("Order #{}: removed {} lines", id, lines.rows_affected);
                Ok(true)
            })
        })
        .await?;

        if deleted {
            tracing::info!("Deleted order #{}", id);
        }
        Ok(deleted)
    }

    async fn customer_orders(&self, customer_id: i32) -> Result<Vec<CustomerOrder>, DomainError> {
        let rows = OrderEntity::find()
            .select_only()
            .column_as(Column::Id, "order_id")
            .column_as(book::Column::Title, "title")
            .column_as(book::Column::Price, "price")
            .join(JoinType::LeftJoin, book_order::Relation::Ordering.def())
            .join(JoinType::LeftJoin, ordering::Relation::Book.def())
            .filter(Column::CustomerId.eq(customer_id))
            .order_by_asc(Column::Id)
            .order_by_asc(ordering::Column::BookId)
            .into_model::<OrderLineRow>()
            .all(&self.db)
            .await?;

        Ok(group_lines(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order_id: i32, line: Option<(&str, i32)>) -> OrderLineRow {
        OrderLineRow {
            order_id,
            title: line.map(|(t, _)| t.to_string()),
            price: line.map(|(_, p)| p),
        }
    }

    #[test]
    fn groups_consecutive_rows_by_order() {
        let grouped = group_lines(vec![
            row(1, Some(("Dune", 12))),
            row(1, Some(("Emma", 8))),
            row(2, None),
            row(3, Some(("Ulysses", 20))),
        ]);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].order_id, 1);
        assert_eq!(grouped[0].items.len(), 2);
        assert!(grouped[1].items.is_empty());
        assert_eq!(
            grouped[2].items,
            vec![OrderItem {
                title: "Ulysses".to_string(),
                price: 20
            }]
        );
    }

    #[test]
    fn no_rows_no_orders() {
        assert!(group_lines(Vec::new()).is_empty());
    }
}
