//! Stock ticket routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, routes::error_response};
use ltp_core::stock::StockLine;
use ltp_db::entities::{stock_lines, stock_tickets};
use ltp_db::repositories::stock::StockRepository;
use ltp_shared::types::{PageRequest, PageResponse};

/// Creates the stock routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stock/tickets", get(list_tickets))
        .route("/stock/tickets/{id}", get(get_ticket))
        .route("/stock/lines/{id}/deliveries", post(deliver_line))
}

/// Response for a stock ticket.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    /// Ticket ID.
    pub id: Uuid,
    /// Project the ticket belongs to.
    pub project_id: Uuid,
    /// Human-readable ticket reference.
    pub reference: String,
    /// Ticket kind (delivery/receipt).
    pub kind: String,
    /// Ticket status.
    pub status: String,
}

impl From<&stock_tickets::Model> for TicketResponse {
    fn from(model: &stock_tickets::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            reference: model.reference.clone(),
            kind: model.kind.clone(),
            status: model.status.clone(),
        }
    }
}

/// Response for a stock movement line.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Material being moved.
    pub material_id: Uuid,
    /// Material name.
    pub material_name: String,
    /// Requested quantity.
    pub requested_qty: Decimal,
    /// Quantity delivered so far.
    pub delivered_qty: Decimal,
    /// Fulfilment status.
    pub status: String,
    /// Creation date of the line.
    pub created_on: NaiveDate,
}

impl From<&stock_lines::Model> for LineResponse {
    fn from(model: &stock_lines::Model) -> Self {
        Self {
            id: model.id,
            material_id: model.material_id,
            material_name: model.material_name.clone(),
            requested_qty: model.requested_qty,
            delivered_qty: model.delivered_qty,
            status: model.status.clone(),
            created_on: model.created_at.date_naive(),
        }
    }
}

/// Response for a ticket with its lines.
#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    /// The ticket itself.
    #[serde(flatten)]
    pub ticket: TicketResponse,
    /// The ticket's movement lines.
    pub lines: Vec<LineResponse>,
}

/// Request body for confirming a delivery on a line.
#[derive(Debug, Deserialize)]
pub struct DeliverRequest {
    /// Quantity delivered now; must be positive and at most the outstanding
    /// quantity.
    pub quantity: Decimal,
}

/// Response for a confirmed delivery.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    /// The line with the delivery applied.
    pub updated: StockLine,
    /// The new pending line carrying the remainder, for partial deliveries.
    pub remainder: Option<StockLine>,
}

/// GET `/stock/tickets` - List tickets, newest first.
async fn list_tickets(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = StockRepository::new((*state.db).clone());

    match repo.list_tickets(&page).await {
        Ok((models, total)) => {
            let data: Vec<TicketResponse> = models.iter().map(TicketResponse::from).collect();
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list stock tickets");
            error_response(&e.into())
        }
    }
}

/// GET `/stock/tickets/{id}` - Fetch a ticket with its lines.
async fn get_ticket(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = StockRepository::new((*state.db).clone());

    match repo.get_ticket(id).await {
        Ok(detail) => Json(TicketDetailResponse {
            ticket: TicketResponse::from(&detail.ticket),
            lines: detail.lines.iter().map(LineResponse::from).collect(),
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, ticket_id = %id, "Failed to fetch stock ticket");
            error_response(&e.into())
        }
    }
}

/// POST `/stock/lines/{id}/deliveries` - Confirm a (possibly partial) delivery.
async fn deliver_line(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeliverRequest>,
) -> impl IntoResponse {
    let repo = StockRepository::new((*state.db).clone());

    match repo.apply_delivery(id, payload.quantity).await {
        Ok(split) => {
            info!(
                line_id = %id,
                quantity = %payload.quantity,
                partial = split.remainder.is_some(),
                "Delivery confirmed"
            );
            (
                StatusCode::CREATED,
                Json(DeliveryResponse {
                    updated: split.updated,
                    remainder: split.remainder,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, line_id = %id, "Failed to confirm delivery");
            error_response(&e.into())
        }
    }
}
