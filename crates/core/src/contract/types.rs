//! Contract domain types.
//!
//! Wire spellings follow the original system: contract statuses serialize as
//! SCREAMING_SNAKE_CASE, installment statuses and cycle statuses keep their
//! Spanish names.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use ltp_shared::types::{ClientId, ContractId, LotId};

/// Lifecycle status of a sale contract.
///
/// Contracts are never physically deleted; cancellation and rescission are
/// status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    /// Contract is active and installments are being collected.
    Active,
    /// All obligations have been settled.
    Completed,
    /// The buyer stopped paying.
    Defaulted,
    /// The contract was rescinded by mutual agreement.
    Rescinded,
    /// The contract was cancelled before taking effect.
    Cancelled,
}

impl ContractStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Defaulted => "DEFAULTED",
            Self::Rescinded => "RESCINDED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Some(Self::Active),
            "COMPLETED" => Some(Self::Completed),
            "DEFAULTED" => Some(Self::Defaulted),
            "RESCINDED" => Some(Self::Rescinded),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sale contract for a lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier.
    pub id: ContractId,
    /// The buying client.
    pub client_id: ClientId,
    /// The lot being sold.
    pub lot_id: LotId,
    /// Agreed sale price for the lot.
    pub base_price: Decimal,
    /// Initial delivery paid at signing.
    pub down_payment: Decimal,
    /// Additional cash paid upfront.
    pub upfront_cash: Decimal,
    /// Number of monthly installments.
    pub installment_count: u32,
    /// Amount of each monthly installment.
    pub monthly_amount: Decimal,
    /// Contract start date. Required whenever `installment_count > 0`.
    pub start_date: Option<NaiveDate>,
    /// Current lifecycle status.
    pub status: ContractStatus,
}

/// Display status of a single installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// The installment has been settled.
    #[serde(rename = "PAGADA")]
    Paid,
    /// The due date has passed without settlement.
    #[serde(rename = "VENCIDA")]
    Overdue,
    /// Not yet due.
    #[serde(rename = "PENDIENTE")]
    Pending,
}

impl InstallmentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "PAGADA",
            Self::Overdue => "VENCIDA",
            Self::Pending => "PENDIENTE",
        }
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single installment of a contract.
///
/// Installments are always derived from the contract terms, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in the schedule.
    pub sequence: u32,
    /// Due date: contract start plus `sequence` calendar months.
    pub due_date: NaiveDate,
    /// Installment amount.
    pub amount: Decimal,
    /// Derived display status.
    pub status: InstallmentStatus,
}

/// Progress status of a payment cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleStatus {
    /// Every installment in the cycle is settled.
    #[serde(rename = "COMPLETED")]
    Completed,
    /// At least one installment is overdue.
    #[serde(rename = "CON_VENCIDAS")]
    HasOverdue,
    /// Some installments are settled, none overdue.
    #[serde(rename = "EN_PROGRESO")]
    InProgress,
    /// No installment has been settled yet.
    #[serde(rename = "PENDIENTE")]
    Pending,
}

/// A fixed-size window of consecutive installments used for progress reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cycle {
    /// 1-based cycle number.
    pub number: u32,
    /// The installments in this cycle, in sequence order.
    pub installments: Vec<Installment>,
    /// How many installments in the cycle are settled.
    pub paid_count: u32,
    /// Total installments in the cycle.
    pub total_count: u32,
    /// Sum of settled installment amounts.
    pub amount_paid: Decimal,
    /// Sum of all installment amounts in the cycle.
    pub amount_total: Decimal,
    /// Derived progress status.
    pub status: CycleStatus,
}

/// Kind of synthetic schedule entry emitted alongside the cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleEntryKind {
    /// The initial delivery agreed at signing.
    DownPayment,
    /// Additional cash paid upfront.
    UpfrontCash,
}

/// A synthetic entry for money agreed outside the installment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// What this entry represents.
    pub kind: ScheduleEntryKind,
    /// Dated at contract start when one is set.
    pub date: Option<NaiveDate>,
    /// Entry amount.
    pub amount: Decimal,
    /// Always settled at signing.
    pub status: InstallmentStatus,
}

/// The full derived schedule of a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Payment cycles in order.
    pub cycles: Vec<Cycle>,
    /// Initial delivery entry, when the contract has one.
    pub down_payment: Option<ScheduleEntry>,
    /// Upfront cash entry, when the contract has one.
    pub upfront_cash: Option<ScheduleEntry>,
}

impl Schedule {
    /// Iterates over every installment across all cycles, in sequence order.
    pub fn installments(&self) -> impl Iterator<Item = &Installment> {
        self.cycles.iter().flat_map(|c| c.installments.iter())
    }

    /// Total number of installments in the schedule.
    #[must_use]
    pub fn installment_count(&self) -> usize {
        self.cycles.iter().map(|c| c.installments.len()).sum()
    }
}

/// A service sold alongside a contract (surveying, connection fees, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractedServiceCharge {
    /// Catalog name of the service.
    pub name: String,
    /// Price agreed at sale time; falls back to the catalog base price.
    pub agreed_price: Option<Decimal>,
    /// Catalog base price.
    pub base_price: Decimal,
    /// Charge date, when recorded.
    pub date: Option<NaiveDate>,
    /// Status text as recorded by the backend.
    pub status: String,
}

impl ContractedServiceCharge {
    /// The price actually charged for the service.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.agreed_price.unwrap_or(self.base_price)
    }
}

/// One installment of a loan granted to the buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInstallment {
    /// 1-based position in the loan schedule.
    pub sequence: u32,
    /// Due date of this loan installment.
    pub due_date: NaiveDate,
    /// Installment amount.
    pub amount: Decimal,
    /// Status text as recorded by the backend.
    pub status: String,
}

/// A loan granted to the buyer alongside the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Human-readable label for the loan.
    pub description: String,
    /// Disbursement date, when the loan has been paid out.
    pub disbursement_date: Option<NaiveDate>,
    /// Disbursement amount, when the loan has been paid out.
    pub disbursement_amount: Option<Decimal>,
    /// The loan's own repayment schedule.
    pub installments: Vec<LoanInstallment>,
}

/// Category a recorded payment is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    /// A payment against the installment plan.
    Payment,
    /// A payment against a contracted service.
    Service,
    /// A payment against a loan.
    Loan,
    /// A manual correction of the balance.
    Adjustment,
}

impl PaymentCategory {
    /// Classifies a free-form payment kind tag.
    ///
    /// The backend records kind tags as free text (mostly Spanish); anything
    /// unrecognized counts as a plain payment.
    #[must_use]
    pub fn classify(kind: &str) -> Self {
        let kind = kind.to_lowercase();
        if kind.contains("ajust") || kind.contains("adjust") {
            Self::Adjustment
        } else if kind.contains("serv") {
            Self::Service
        } else if kind.contains("prest") || kind.contains("prést") || kind.contains("loan") {
            Self::Loan
        } else {
            Self::Payment
        }
    }
}

/// A money movement recorded against a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Free-form kind tag as recorded (e.g. "PAGO CUOTA", "AJUSTE").
    pub kind: String,
    /// Human-readable concept.
    pub description: String,
    /// Signed amount; only adjustments may be negative.
    pub amount: Decimal,
    /// Payment date, when recorded.
    pub date: Option<NaiveDate>,
    /// Status text as recorded by the backend.
    pub status: String,
}
