//! Contract repository for database operations.
//!
//! Status columns are stored as text and converted through the core enums at
//! this boundary; a stored status the core does not know surfaces as a typed
//! error instead of leaking raw strings upward.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{
    contracted_services, contracts, loan_installments, loans, payments, services,
};
use ltp_core::contract::{
    Contract, ContractStatus, ContractedServiceCharge, Loan, LoanInstallment, PaymentRecord,
};
use ltp_shared::AppError;
use ltp_shared::types::{ClientId, ContractId, LotId, PageRequest};

/// Error types for contract repository operations.
#[derive(Debug, thiserror::Error)]
pub enum ContractRepoError {
    /// Contract not found.
    #[error("Contract not found: {0}")]
    NotFound(Uuid),

    /// A stored record does not satisfy the domain invariants.
    #[error("Stored contract data is invalid: {0}")]
    InvalidRecord(String),

    /// A contracted service points at a missing catalog entry.
    #[error("Catalog service missing for contracted service {0}")]
    MissingCatalogService(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ContractRepoError> for AppError {
    fn from(err: ContractRepoError) -> Self {
        match err {
            ContractRepoError::NotFound(_) => Self::NotFound(err.to_string()),
            ContractRepoError::InvalidRecord(_) | ContractRepoError::MissingCatalogService(_) => {
                Self::Internal(err.to_string())
            }
            ContractRepoError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a contract.
#[derive(Debug, Clone)]
pub struct CreateContractInput {
    /// The buying client.
    pub client_id: Uuid,
    /// The lot being sold.
    pub lot_id: Uuid,
    /// Agreed sale price.
    pub base_price: Decimal,
    /// Initial delivery paid at signing.
    pub down_payment: Decimal,
    /// Additional cash paid upfront.
    pub upfront_cash: Decimal,
    /// Number of monthly installments.
    pub installment_count: u32,
    /// Amount of each monthly installment.
    pub monthly_amount: Decimal,
    /// Contract start date.
    pub start_date: Option<NaiveDate>,
}

/// Input for refinancing or editing a contract.
///
/// Refinancing fully replaces the provided terms; omitted fields keep their
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateContractInput {
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
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New lifecycle status.
    pub status: Option<ContractStatus>,
}

/// Everything the statement aggregator needs for one contract.
#[derive(Debug, Clone)]
pub struct StatementInputs {
    /// The contract in domain form.
    pub contract: Contract,
    /// Services sold alongside the contract.
    pub services: Vec<ContractedServiceCharge>,
    /// Loans granted alongside the contract.
    pub loans: Vec<Loan>,
    /// Recorded payments.
    pub payments: Vec<PaymentRecord>,
}

/// Contract repository.
#[derive(Debug, Clone)]
pub struct ContractRepository {
    db: DatabaseConnection,
}

impl ContractRepository {
    /// Creates a new contract repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a contract.
    pub async fn create(
        &self,
        input: CreateContractInput,
    ) -> Result<contracts::Model, ContractRepoError> {
        let now = Utc::now();
        let model = contracts::ActiveModel {
            id: Set(ContractId::new().into_inner()),
            client_id: Set(input.client_id),
            lot_id: Set(input.lot_id),
            base_price: Set(input.base_price),
            down_payment: Set(input.down_payment),
            upfront_cash: Set(input.upfront_cash),
            installment_count: Set(i32::try_from(input.installment_count).map_err(|_| {
                ContractRepoError::InvalidRecord("installment count out of range".to_string())
            })?),
            monthly_amount: Set(input.monthly_amount),
            start_date: Set(input.start_date),
            status: Set(ContractStatus::Active.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(model)
    }

    /// Fetches a contract by ID.
    pub async fn get(&self, id: Uuid) -> Result<contracts::Model, ContractRepoError> {
        contracts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ContractRepoError::NotFound(id))
    }

    /// Lists contracts, newest first, with the total count.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<contracts::Model>, u64), ContractRepoError> {
        let paginator = contracts::Entity::find()
            .order_by_desc(contracts::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let models = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((models, total))
    }

    /// Applies a refinance/edit to a contract.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateContractInput,
    ) -> Result<contracts::Model, ContractRepoError> {
        let model = self.get(id).await?;
        let mut active: contracts::ActiveModel = model.into();

        if let Some(base_price) = input.base_price {
            active.base_price = Set(base_price);
        }
        if let Some(down_payment) = input.down_payment {
            active.down_payment = Set(down_payment);
        }
        if let Some(upfront_cash) = input.upfront_cash {
            active.upfront_cash = Set(upfront_cash);
        }
        if let Some(installment_count) = input.installment_count {
            active.installment_count = Set(i32::try_from(installment_count).map_err(|_| {
                ContractRepoError::InvalidRecord("installment count out of range".to_string())
            })?);
        }
        if let Some(monthly_amount) = input.monthly_amount {
            active.monthly_amount = Set(monthly_amount);
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(Some(start_date));
        }
        if let Some(status) = input.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Fetches everything the statement aggregator needs for a contract.
    #[tracing::instrument(skip(self))]
    pub async fn statement_inputs(&self, id: Uuid) -> Result<StatementInputs, ContractRepoError> {
        let contract = contract_to_domain(&self.get(id).await?)?;

        let service_rows = contracted_services::Entity::find()
            .filter(contracted_services::Column::ContractId.eq(id))
            .find_also_related(services::Entity)
            .all(&self.db)
            .await?;
        let services = service_rows
            .into_iter()
            .map(|(charge, catalog)| {
                let catalog =
                    catalog.ok_or(ContractRepoError::MissingCatalogService(charge.id))?;
                Ok(service_to_domain(&charge, &catalog))
            })
            .collect::<Result<Vec<_>, ContractRepoError>>()?;

        let loan_models = loans::Entity::find()
            .filter(loans::Column::ContractId.eq(id))
            .all(&self.db)
            .await?;
        let mut loan_list = Vec::with_capacity(loan_models.len());
        for loan in loan_models {
            let installments = loan_installments::Entity::find()
                .filter(loan_installments::Column::LoanId.eq(loan.id))
                .order_by_asc(loan_installments::Column::Sequence)
                .all(&self.db)
                .await?;
            loan_list.push(loan_to_domain(&loan, &installments)?);
        }

        let payment_models = payments::Entity::find()
            .filter(payments::Column::ContractId.eq(id))
            .order_by_asc(payments::Column::PaidOn)
            .all(&self.db)
            .await?;
        let payment_list: Vec<PaymentRecord> =
            payment_models.iter().map(payment_to_domain).collect();

        Ok(StatementInputs {
            contract,
            services,
            loans: loan_list,
            payments: payment_list,
        })
    }
}

/// Converts a stored contract into its domain form.
pub fn contract_to_domain(model: &contracts::Model) -> Result<Contract, ContractRepoError> {
    let status = ContractStatus::parse(&model.status).ok_or_else(|| {
        ContractRepoError::InvalidRecord(format!("unknown contract status `{}`", model.status))
    })?;
    let installment_count = u32::try_from(model.installment_count).map_err(|_| {
        ContractRepoError::InvalidRecord(format!(
            "negative installment count {}",
            model.installment_count
        ))
    })?;

    Ok(Contract {
        id: ContractId::from_uuid(model.id),
        client_id: ClientId::from_uuid(model.client_id),
        lot_id: LotId::from_uuid(model.lot_id),
        base_price: model.base_price,
        down_payment: model.down_payment,
        upfront_cash: model.upfront_cash,
        installment_count,
        monthly_amount: model.monthly_amount,
        start_date: model.start_date,
        status,
    })
}

/// Converts a contracted-service row plus its catalog entry.
#[must_use]
pub fn service_to_domain(
    charge: &contracted_services::Model,
    catalog: &services::Model,
) -> ContractedServiceCharge {
    ContractedServiceCharge {
        name: catalog.name.clone(),
        agreed_price: charge.agreed_price,
        base_price: catalog.base_price,
        date: charge.charged_on,
        status: charge.status.clone(),
    }
}

/// Converts a stored loan and its installment rows.
pub fn loan_to_domain(
    loan: &loans::Model,
    installments: &[loan_installments::Model],
) -> Result<Loan, ContractRepoError> {
    let installments = installments
        .iter()
        .map(|row| {
            let sequence = u32::try_from(row.sequence).map_err(|_| {
                ContractRepoError::InvalidRecord(format!(
                    "negative loan installment sequence {}",
                    row.sequence
                ))
            })?;
            Ok(LoanInstallment {
                sequence,
                due_date: row.due_date,
                amount: row.amount,
                status: row.status.clone(),
            })
        })
        .collect::<Result<Vec<_>, ContractRepoError>>()?;

    Ok(Loan {
        description: loan.description.clone(),
        disbursement_date: loan.disbursed_on,
        disbursement_amount: loan.disbursed_amount,
        installments,
    })
}

/// Converts a stored payment row.
#[must_use]
pub fn payment_to_domain(model: &payments::Model) -> PaymentRecord {
    PaymentRecord {
        kind: model.kind.clone(),
        description: model.description.clone(),
        amount: model.amount,
        date: model.paid_on,
        status: model.status.clone(),
    }
}
