//! Account statement aggregation.
//!
//! Merges the derived schedule, contracted services, loans, and recorded
//! payments into one chronological statement with running balances. Debits
//! increase what the buyer owes; credits decrease it.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{
    ContractedServiceCharge, Loan, PaymentCategory, PaymentRecord, Schedule, ScheduleEntryKind,
};

/// Days ahead of the due date within which an entry counts as due soon.
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Alert classification of a statement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// The entry is past due or its status marks it overdue.
    Overdue,
    /// The entry falls due within the next week.
    Upcoming,
    /// Nothing to flag.
    None,
}

impl AlertLevel {
    /// Returns the string representation of the alert level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Upcoming => "upcoming",
            Self::None => "none",
        }
    }
}

/// Kind tag of a statement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Initial delivery agreed at signing.
    DownPayment,
    /// Cash paid upfront at signing.
    UpfrontCash,
    /// A schedule installment.
    Installment,
    /// A contracted service charge.
    Service,
    /// A loan paid out to the buyer.
    LoanDisbursement,
    /// An installment of a loan.
    LoanInstallment,
    /// A recorded payment.
    Payment,
    /// A manual balance correction.
    Adjustment,
}

impl StatementKind {
    /// Returns the string representation of the kind tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DownPayment => "down_payment",
            Self::UpfrontCash => "upfront_cash",
            Self::Installment => "installment",
            Self::Service => "service",
            Self::LoanDisbursement => "loan_disbursement",
            Self::LoanInstallment => "loan_installment",
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
        }
    }
}

/// One row of the unified account statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementEntry {
    /// Entry date; rows without one sort last and never alert.
    pub date: Option<NaiveDate>,
    /// Kind tag.
    pub kind: StatementKind,
    /// Human-readable concept.
    pub description: String,
    /// Amount owed by this entry.
    pub debit: Decimal,
    /// Amount settled by this entry.
    pub credit: Decimal,
    /// Status text carried from the source record.
    pub status: String,
    /// Alert classification.
    pub alert: AlertLevel,
    /// Running balance after this entry.
    pub balance: Decimal,
}

/// Totals over a full statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    /// Sum of all debit amounts.
    pub debit_total: Decimal,
    /// Sum of all credit amounts.
    pub credit_total: Decimal,
    /// Closing running balance (`debit_total - credit_total`).
    pub closing_balance: Decimal,
}

/// Classifies the alert level of an entry.
///
/// Overdue wins over upcoming; a status text containing "venc" (as in
/// "VENCIDA") marks the entry overdue regardless of its date. Entries
/// without a date are never classified.
#[must_use]
pub fn classify_alert(date: Option<NaiveDate>, status: &str, today: NaiveDate) -> AlertLevel {
    let Some(date) = date else {
        return AlertLevel::None;
    };
    if status.to_lowercase().contains("venc") || date < today {
        AlertLevel::Overdue
    } else if date <= today + Duration::days(UPCOMING_WINDOW_DAYS) {
        AlertLevel::Upcoming
    } else {
        AlertLevel::None
    }
}

/// Builds the unified account statement of a contract.
///
/// Entries are collected in source order (schedule entries, installments,
/// services, loans, payments), stably sorted by date ascending with undated
/// rows last, then assigned a running balance.
#[must_use]
pub fn build_statement(
    schedule: &Schedule,
    services: &[ContractedServiceCharge],
    loans: &[Loan],
    payments: &[PaymentRecord],
    today: NaiveDate,
) -> Vec<StatementEntry> {
    let mut entries = Vec::new();

    for synthetic in [&schedule.down_payment, &schedule.upfront_cash]
        .into_iter()
        .flatten()
    {
        let (kind, description) = match synthetic.kind {
            ScheduleEntryKind::DownPayment => (StatementKind::DownPayment, "Entrega inicial"),
            ScheduleEntryKind::UpfrontCash => (StatementKind::UpfrontCash, "Pago contado"),
        };
        entries.push(debit_entry(
            synthetic.date,
            kind,
            description.to_string(),
            synthetic.amount,
            synthetic.status.as_str().to_string(),
            today,
        ));
    }

    for installment in schedule.installments() {
        entries.push(debit_entry(
            Some(installment.due_date),
            StatementKind::Installment,
            format!("Cuota {}", installment.sequence),
            installment.amount,
            installment.status.as_str().to_string(),
            today,
        ));
    }

    for service in services {
        entries.push(debit_entry(
            service.date,
            StatementKind::Service,
            service.name.clone(),
            service.effective_price(),
            service.status.clone(),
            today,
        ));
    }

    for loan in loans {
        if let Some(amount) = loan.disbursement_amount {
            entries.push(credit_entry(
                loan.disbursement_date,
                StatementKind::LoanDisbursement,
                format!("Desembolso {}", loan.description),
                amount,
                String::new(),
                today,
            ));
        }
        for installment in &loan.installments {
            entries.push(debit_entry(
                Some(installment.due_date),
                StatementKind::LoanInstallment,
                format!("Cuota préstamo {}", installment.sequence),
                installment.amount,
                installment.status.clone(),
                today,
            ));
        }
    }

    for payment in payments {
        entries.push(payment_entry(payment, today));
    }

    // Stable sort: dated rows ascending, undated rows at the end in source order.
    entries.sort_by_key(|e| (e.date.is_none(), e.date));

    let mut balance = Decimal::ZERO;
    for entry in &mut entries {
        balance += entry.debit - entry.credit;
        entry.balance = balance;
    }

    entries
}

/// Computes the totals over a statement.
#[must_use]
pub fn statement_totals(entries: &[StatementEntry]) -> StatementTotals {
    let debit_total: Decimal = entries.iter().map(|e| e.debit).sum();
    let credit_total: Decimal = entries.iter().map(|e| e.credit).sum();
    StatementTotals {
        debit_total,
        credit_total,
        closing_balance: debit_total - credit_total,
    }
}

fn debit_entry(
    date: Option<NaiveDate>,
    kind: StatementKind,
    description: String,
    amount: Decimal,
    status: String,
    today: NaiveDate,
) -> StatementEntry {
    StatementEntry {
        alert: classify_alert(date, &status, today),
        date,
        kind,
        description,
        debit: amount,
        credit: Decimal::ZERO,
        status,
        balance: Decimal::ZERO,
    }
}

fn credit_entry(
    date: Option<NaiveDate>,
    kind: StatementKind,
    description: String,
    amount: Decimal,
    status: String,
    today: NaiveDate,
) -> StatementEntry {
    StatementEntry {
        alert: classify_alert(date, &status, today),
        date,
        kind,
        description,
        debit: Decimal::ZERO,
        credit: amount,
        status,
        balance: Decimal::ZERO,
    }
}

fn payment_entry(payment: &PaymentRecord, today: NaiveDate) -> StatementEntry {
    match PaymentCategory::classify(&payment.kind) {
        PaymentCategory::Adjustment => {
            // Positive adjustments raise the outstanding balance, negative
            // ones lower it.
            if payment.amount >= Decimal::ZERO {
                debit_entry(
                    payment.date,
                    StatementKind::Adjustment,
                    payment.description.clone(),
                    payment.amount,
                    payment.status.clone(),
                    today,
                )
            } else {
                credit_entry(
                    payment.date,
                    StatementKind::Adjustment,
                    payment.description.clone(),
                    payment.amount.abs(),
                    payment.status.clone(),
                    today,
                )
            }
        }
        PaymentCategory::Payment | PaymentCategory::Service | PaymentCategory::Loan => {
            credit_entry(
                payment.date,
                StatementKind::Payment,
                payment.description.clone(),
                payment.amount,
                payment.status.clone(),
                today,
            )
        }
    }
}
