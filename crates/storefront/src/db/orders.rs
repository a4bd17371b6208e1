//! Order repository.
//!
//! Orders and their line items are append-only. An order and all of its
//! lines are written in one transaction, so a stored order never lacks
//! items.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::instrument;

use golden_crumb_core::order::{NewOrder, Order, OrderDetail, OrderLineRecord};
use golden_crumb_core::{OrderNumber, OrderRowId, Price};

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderRowId,
    order_id: String,
    customer_name: String,
    customer_phone: String,
    pickup_time: String,
    item_count: i64,
    subtotal: Price,
    created_at: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            order_id: OrderNumber::new(row.order_id),
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            pickup_time: row.pickup_time,
            item_count: row.item_count,
            subtotal: row.subtotal,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    item_id: String,
    title: String,
    qty: i64,
    unit_price: Price,
    line_total: Price,
}

impl From<OrderLineRow> for OrderLineRecord {
    fn from(row: OrderLineRow) -> Self {
        Self {
            item_id: row.item_id,
            title: row.title,
            qty: row.qty,
            unit_price: row.unit_price,
            line_total: row.line_total,
        }
    }
}

async fn insert_order(conn: &mut SqliteConnection, order: &NewOrder) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO orders
            (order_id, customer_name, customer_phone, pickup_time, item_count, subtotal, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(order.order_number.as_str())
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(&order.pickup_time)
    .bind(order.item_count)
    .bind(order.subtotal)
    .bind(&order.created_at)
    .execute(&mut *conn)
    .await?;

    for item in &order.items {
        sqlx::query(
            r"
            INSERT INTO order_line_items
                (order_id, item_id, title, qty, unit_price, line_total)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(order.order_number.as_str())
        .bind(item.id.as_deref())
        .bind(item.title.as_deref())
        .bind(item.qty)
        .bind(item.unit_price)
        .bind(item.line_total)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Repository for pickup orders.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, order_id, customer_name, customer_phone, pickup_time,
                   item_count, subtotal, created_at
            FROM orders
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Find an order by its public order number, with its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find(&self, order_number: &str) -> Result<Option<OrderDetail>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r"
            SELECT id, order_id, customer_name, customer_phone, pickup_time,
                   item_count, subtotal, created_at
            FROM orders
            WHERE order_id = ?
            ",
        )
        .bind(order_number)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<OrderLineRow> = sqlx::query_as(
            r"
            SELECT item_id, title, qty, unit_price, line_total
            FROM order_line_items
            WHERE order_id = ?
            ORDER BY id ASC
            ",
        )
        .bind(order_number)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(OrderDetail {
            order: row.into(),
            items: items.into_iter().map(Into::into).collect(),
        }))
    }

    /// Store an order and its line items atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails, e.g. a
    /// duplicate order number or a line item missing a required field.
    /// Nothing is stored in that case.
    #[instrument(skip(self, order), fields(order_id = %order.order_number, items = order.items.len()))]
    pub async fn create(&self, order: &NewOrder) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        match insert_order(&mut tx, order).await {
            Ok(()) => {
                tx.commit().await?;
                tracing::info!("Order stored");
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use golden_crumb_core::order::OrderLineInput;

    use super::*;
    use crate::db::testing::{count, empty_pool};

    fn line(id: &str, qty: i64, cents: i64) -> OrderLineInput {
        OrderLineInput {
            id: Some(id.to_owned()),
            title: Some(format!("Item {id}")),
            qty: Some(qty),
            unit_price: Some(Price::from_cents(cents)),
            line_total: Some(Price::from_cents(cents * qty)),
        }
    }

    fn new_order(number: &str, items: Vec<OrderLineInput>) -> NewOrder {
        NewOrder {
            order_number: OrderNumber::new(number.to_owned()),
            customer_name: "Ada".to_owned(),
            customer_phone: "+1 555 123 4567".to_owned(),
            pickup_time: "2026-10-20T09:30".to_owned(),
            item_count: 2,
            subtotal: Price::from_cents(600),
            created_at: "2026-10-19T08:00:00.000Z".to_owned(),
            items,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = empty_pool().await;
        let repo = OrderRepository::new(&pool);
        repo.create(&new_order("GC-1", vec![line("a", 2, 300)]))
            .await
            .unwrap();

        let detail = repo.find("GC-1").await.unwrap().unwrap();
        assert_eq!(detail.order.order_id.as_str(), "GC-1");
        assert_eq!(detail.order.subtotal, Price::from_cents(600));
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].line_total, Price::from_cents(600));

        assert!(repo.find("GC-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = empty_pool().await;
        let repo = OrderRepository::new(&pool);
        for number in ["GC-1", "GC-2", "GC-3"] {
            repo.create(&new_order(number, vec![line("a", 1, 300)]))
                .await
                .unwrap();
        }

        let numbers: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.order_id.to_string())
            .collect();
        assert_eq!(numbers, vec!["GC-3", "GC-2", "GC-1"]);
    }

    #[tokio::test]
    async fn test_duplicate_order_number_fails() {
        let pool = empty_pool().await;
        let repo = OrderRepository::new(&pool);
        repo.create(&new_order("GC-1", vec![line("a", 1, 300)]))
            .await
            .unwrap();

        let err = repo
            .create(&new_order("GC-1", vec![line("b", 1, 500)]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Database(_)));
        assert_eq!(count(&pool, "orders").await, 1);
        assert_eq!(count(&pool, "order_line_items").await, 1);
    }

    #[tokio::test]
    async fn test_bad_line_item_stores_nothing() {
        let pool = empty_pool().await;
        let repo = OrderRepository::new(&pool);

        let mut bad = line("b", 1, 500);
        bad.title = None;
        let result = repo
            .create(&new_order("GC-1", vec![line("a", 1, 300), bad]))
            .await;

        assert!(result.is_err());
        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "order_line_items").await, 0);
    }
}
