//! Contract management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, routes::error_response};
use ltp_core::contract::{
    ContractStatus, Schedule, StatementEntry, StatementTotals, build_schedule, build_statement,
    statement_totals,
};
use ltp_core::export::statement_csv;
use ltp_db::entities::contracts;
use ltp_db::repositories::contract::{
    ContractRepository, CreateContractInput, UpdateContractInput, contract_to_domain,
};
use ltp_shared::AppError;
use ltp_shared::types::{PageRequest, PageResponse};

/// Creates the contract routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contracts", get(list_contracts).post(create_contract))
        .route("/contracts/{id}", get(get_contract).patch(update_contract))
        .route("/contracts/{id}/schedule", get(get_schedule))
        .route("/contracts/{id}/statement", get(get_statement))
        .route("/contracts/{id}/statement.csv", get(export_statement))
}

/// Request body for creating a contract.
#[derive(Debug, Deserialize)]
pub struct CreateContractRequest {
    /// The buying client.
    pub client_id: Uuid,
    /// The lot being sold.
    pub lot_id: Uuid,
    /// Agreed sale price.
    pub base_price: Decimal,
    /// Initial delivery paid at signing.
    #[serde(default)]
    pub down_payment: Decimal,
    /// Additional cash paid upfront.
    #[serde(default)]
    pub upfront_cash: Decimal,
    /// Number of monthly installments.
    #[serde(default)]
    pub installment_count: u32,
    /// Amount of each monthly installment.
    #[serde(default)]
    pub monthly_amount: Decimal,
    /// Contract start date (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
}

/// Request body for refinancing or editing a contract.
#[derive(Debug, Deserialize)]
pub struct UpdateContractRequest {
    /// New sale price.
    pub base_price: Option<Decimal>,
    /// New initial delivery amount.
    pub down_payment: Option<Decimal>,
    /// New upfront cash amount.
    pub upfront_cash: Option<Decimal>,
    /// New installment count.
    pub installment_count: Option<u32>,
    /// New monthly installment amount.
    pub monthly_amount: Option<Decimal>,
    /// New start date (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// New status: ACTIVE, COMPLETED, DEFAULTED, RESCINDED, or CANCELLED.
    pub status: Option<String>,
}

/// Query parameters pinning the reference date of derived views.
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    /// Reference date for status and alert derivation; defaults to today.
    pub as_of: Option<NaiveDate>,
}

impl AsOfQuery {
    fn resolve(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Response for a contract.
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    /// Contract ID.
    pub id: Uuid,
    /// Client ID.
    pub client_id: Uuid,
    /// Lot ID.
    pub lot_id: Uuid,
    /// Agreed sale price.
    pub base_price: Decimal,
    /// Initial delivery amount.
    pub down_payment: Decimal,
    /// Upfront cash amount.
    pub upfront_cash: Decimal,
    /// Number of monthly installments.
    pub installment_count: i32,
    /// Monthly installment amount.
    pub monthly_amount: Decimal,
    /// Contract start date.
    pub start_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
}

impl From<&contracts::Model> for ContractResponse {
    fn from(model: &contracts::Model) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            lot_id: model.lot_id,
            base_price: model.base_price,
            down_payment: model.down_payment,
            upfront_cash: model.upfront_cash,
            installment_count: model.installment_count,
            monthly_amount: model.monthly_amount,
            start_date: model.start_date,
            status: model.status.clone(),
        }
    }
}

/// Response for an account statement.
#[derive(Debug, Serialize)]
pub struct StatementResponse {
    /// Statement rows in date order with running balances.
    pub entries: Vec<StatementEntry>,
    /// Totals over the whole statement.
    pub totals: StatementTotals,
}

/// GET `/contracts` - List contracts, newest first.
async fn list_contracts(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = ContractRepository::new((*state.db).clone());

    match repo.list(&page).await {
        Ok((models, total)) => {
            let data: Vec<ContractResponse> = models.iter().map(ContractResponse::from).collect();
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list contracts");
            error_response(&e.into())
        }
    }
}

/// POST `/contracts` - Create a contract.
async fn create_contract(
    State(state): State<AppState>,
    Json(payload): Json<CreateContractRequest>,
) -> impl IntoResponse {
    for (field, amount) in [
        ("base_price", payload.base_price),
        ("down_payment", payload.down_payment),
        ("upfront_cash", payload.upfront_cash),
        ("monthly_amount", payload.monthly_amount),
    ] {
        if amount < Decimal::ZERO {
            return error_response(&AppError::Validation(format!(
                "{field} must not be negative"
            )));
        }
    }
    if payload.installment_count > 0 && payload.start_date.is_none() {
        return error_response(&AppError::Validation(
            "start_date is required when installment_count > 0".to_string(),
        ));
    }

    let repo = ContractRepository::new((*state.db).clone());
    let input = CreateContractInput {
        client_id: payload.client_id,
        lot_id: payload.lot_id,
        base_price: payload.base_price,
        down_payment: payload.down_payment,
        upfront_cash: payload.upfront_cash,
        installment_count: payload.installment_count,
        monthly_amount: payload.monthly_amount,
        start_date: payload.start_date,
    };

    match repo.create(input).await {
        Ok(model) => {
            info!(contract_id = %model.id, "Contract created");
            (StatusCode::CREATED, Json(ContractResponse::from(&model))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create contract");
            error_response(&e.into())
        }
    }
}

/// GET `/contracts/{id}` - Fetch one contract.
async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ContractRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(model) => Json(ContractResponse::from(&model)).into_response(),
        Err(e) => {
            error!(error = %e, contract_id = %id, "Failed to fetch contract");
            error_response(&e.into())
        }
    }
}

/// PATCH `/contracts/{id}` - Refinance terms or change status.
async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContractRequest>,
) -> impl IntoResponse {
    let status = match payload.status.as_deref().map(ContractStatus::parse) {
        Some(None) => {
            return error_response(&AppError::Validation(format!(
                "unknown contract status `{}`",
                payload.status.unwrap_or_default()
            )));
        }
        Some(Some(status)) => Some(status),
        None => None,
    };

    let repo = ContractRepository::new((*state.db).clone());
    let input = UpdateContractInput {
        base_price: payload.base_price,
        down_payment: payload.down_payment,
        upfront_cash: payload.upfront_cash,
        installment_count: payload.installment_count,
        monthly_amount: payload.monthly_amount,
        start_date: payload.start_date,
        status,
    };

    match repo.update(id, input).await {
        Ok(model) => {
            info!(contract_id = %id, "Contract updated");
            Json(ContractResponse::from(&model)).into_response()
        }
        Err(e) => {
            error!(error = %e, contract_id = %id, "Failed to update contract");
            error_response(&e.into())
        }
    }
}

/// GET `/contracts/{id}/schedule` - Cycles plus synthetic entries.
async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    let repo = ContractRepository::new((*state.db).clone());

    let model = match repo.get(id).await {
        Ok(model) => model,
        Err(e) => {
            error!(error = %e, contract_id = %id, "Failed to fetch contract");
            return error_response(&e.into());
        }
    };

    match derive_schedule(&model, query.resolve()) {
        Ok(schedule) => Json(schedule).into_response(),
        Err(e) => {
            error!(error = %e, contract_id = %id, "Failed to derive schedule");
            error_response(&e)
        }
    }
}

/// GET `/contracts/{id}/statement` - The unified account statement.
async fn get_statement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    match load_statement(&state, id, query.resolve()).await {
        Ok(entries) => {
            let totals = statement_totals(&entries);
            Json(StatementResponse { entries, totals }).into_response()
        }
        Err(e) => {
            error!(error = %e, contract_id = %id, "Failed to build statement");
            error_response(&e)
        }
    }
}

/// GET `/contracts/{id}/statement.csv` - The statement as a CSV download.
async fn export_statement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    let entries = match load_statement(&state, id, query.resolve()).await {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, contract_id = %id, "Failed to build statement");
            return error_response(&e);
        }
    };

    match statement_csv(&entries) {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"statement.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, contract_id = %id, "Failed to export statement");
            error_response(&e.into())
        }
    }
}

fn derive_schedule(model: &contracts::Model, today: NaiveDate) -> Result<Schedule, AppError> {
    let contract = contract_to_domain(model)?;
    Ok(build_schedule(&contract, today)?)
}

async fn load_statement(
    state: &AppState,
    id: Uuid,
    today: NaiveDate,
) -> Result<Vec<StatementEntry>, AppError> {
    let repo = ContractRepository::new((*state.db).clone());
    let inputs = repo.statement_inputs(id).await?;
    let schedule = build_schedule(&inputs.contract, today)?;
    Ok(build_statement(
        &schedule,
        &inputs.services,
        &inputs.loans,
        &inputs.payments,
        today,
    ))
}
