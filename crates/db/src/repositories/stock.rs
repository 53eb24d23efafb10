//! Stock ticket repository for database operations.
//!
//! The delivery split itself is pure computation in `ltp-core`; this
//! repository loads the line, runs the split, and persists the updated line
//! plus the optional remainder line in one transaction.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{stock_lines, stock_tickets};
use ltp_core::stock::{DeliverySplit, LineStatus, StockError, StockLine, split_delivery};
use ltp_shared::AppError;
use ltp_shared::types::{MaterialId, PageRequest, StockLineId, StockTicketId};

/// Error types for stock repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StockRepoError {
    /// Ticket not found.
    #[error("Stock ticket not found: {0}")]
    TicketNotFound(Uuid),

    /// Line not found.
    #[error("Stock line not found: {0}")]
    LineNotFound(Uuid),

    /// A stored line carries a status the domain does not know.
    #[error("Unknown stock line status `{0}`")]
    UnknownStatus(String),

    /// The delivery violated a domain rule.
    #[error(transparent)]
    Delivery(#[from] StockError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StockRepoError> for AppError {
    fn from(err: StockRepoError) -> Self {
        match err {
            StockRepoError::TicketNotFound(_) | StockRepoError::LineNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            StockRepoError::UnknownStatus(_) => Self::Internal(err.to_string()),
            StockRepoError::Delivery(inner) => inner.into(),
            StockRepoError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// A ticket together with its movement lines.
#[derive(Debug, Clone)]
pub struct TicketWithLines {
    /// The ticket record.
    pub ticket: stock_tickets::Model,
    /// The ticket's lines, oldest first.
    pub lines: Vec<stock_lines::Model>,
}

/// Stock ticket repository.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
}

impl StockRepository {
    /// Creates a new stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists tickets, newest first, with the total count.
    pub async fn list_tickets(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<stock_tickets::Model>, u64), StockRepoError> {
        let paginator = stock_tickets::Entity::find()
            .order_by_desc(stock_tickets::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let models = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((models, total))
    }

    /// Fetches a ticket and its lines.
    pub async fn get_ticket(&self, id: Uuid) -> Result<TicketWithLines, StockRepoError> {
        let ticket = stock_tickets::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StockRepoError::TicketNotFound(id))?;

        let lines = stock_lines::Entity::find()
            .filter(stock_lines::Column::TicketId.eq(id))
            .order_by_asc(stock_lines::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(TicketWithLines { ticket, lines })
    }

    /// Applies a delivery to a line.
    ///
    /// Runs the pure split, then persists the updated line and the optional
    /// remainder line atomically.
    #[tracing::instrument(skip(self))]
    pub async fn apply_delivery(
        &self,
        line_id: Uuid,
        quantity: Decimal,
    ) -> Result<DeliverySplit, StockRepoError> {
        let txn = self.db.begin().await?;

        let model = stock_lines::Entity::find_by_id(line_id)
            .one(&txn)
            .await?
            .ok_or(StockRepoError::LineNotFound(line_id))?;
        let line = line_to_domain(&model)?;

        let split = split_delivery(&line, quantity)?;

        let now = Utc::now();
        let mut updated: stock_lines::ActiveModel = model.into();
        updated.delivered_qty = Set(split.updated.delivered);
        updated.status = Set(split.updated.status.as_str().to_string());
        updated.updated_at = Set(now.into());
        updated.update(&txn).await?;

        if let Some(remainder) = &split.remainder {
            stock_lines::ActiveModel {
                id: Set(remainder.id.into_inner()),
                ticket_id: Set(remainder.ticket_id.into_inner()),
                material_id: Set(remainder.material_id.into_inner()),
                material_name: Set(remainder.material_name.clone()),
                requested_qty: Set(remainder.original),
                delivered_qty: Set(remainder.delivered),
                status: Set(remainder.status.as_str().to_string()),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(split)
    }
}

/// Converts a stored line into its domain form.
pub fn line_to_domain(model: &stock_lines::Model) -> Result<StockLine, StockRepoError> {
    let status = LineStatus::parse(&model.status)
        .ok_or_else(|| StockRepoError::UnknownStatus(model.status.clone()))?;

    Ok(StockLine {
        id: StockLineId::from_uuid(model.id),
        ticket_id: StockTicketId::from_uuid(model.ticket_id),
        material_id: MaterialId::from_uuid(model.material_id),
        material_name: model.material_name.clone(),
        original: model.requested_qty,
        delivered: model.delivered_qty,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_line_model(status: &str) -> stock_lines::Model {
        stock_lines::Model {
            id: Uuid::new_v4(),
            ticket_id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            material_name: "Cemento Portland".to_string(),
            requested_qty: dec!(10),
            delivered_qty: dec!(4),
            status: status.to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_line_to_domain() {
        let model = make_line_model("PARTIALLY_DELIVERED");
        let line = line_to_domain(&model).unwrap();

        assert_eq!(line.id.into_inner(), model.id);
        assert_eq!(line.original, dec!(10));
        assert_eq!(line.delivered, dec!(4));
        assert_eq!(line.status, LineStatus::PartiallyDelivered);
        assert_eq!(line.outstanding(), dec!(6));
    }

    #[test]
    fn test_line_to_domain_unknown_status() {
        let model = make_line_model("SHIPPED");
        let err = line_to_domain(&model).unwrap_err();
        assert!(matches!(err, StockRepoError::UnknownStatus(_)));
    }

    #[test]
    fn test_delivery_error_maps_to_validation() {
        let err = StockRepoError::Delivery(StockError::InvalidDeliveryQuantity {
            requested: dec!(0),
            outstanding: dec!(10),
        });
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 400);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let app: AppError = StockRepoError::LineNotFound(Uuid::nil()).into();
        assert_eq!(app.status_code(), 404);
    }
}
