//! Installment schedule and payment cycle derivation.
//!
//! The schedule is recomputed from the contract terms on every call; nothing
//! here is persisted. `today` is always an explicit parameter so callers and
//! tests control the reference date.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use super::error::ContractError;
use super::types::{
    Contract, ContractStatus, Cycle, CycleStatus, Installment, InstallmentStatus, Schedule,
    ScheduleEntry, ScheduleEntryKind,
};

/// Number of installments grouped into one payment cycle.
pub const CYCLE_SIZE: u32 = 6;

/// How many leading installments of an active contract present as settled.
///
/// Payment matching is not wired into the schedule yet; the first two
/// installments of an active contract are presented as settled until it is.
const SETTLED_LEAD_INSTALLMENTS: u32 = 2;

/// Derives the full schedule of a contract: payment cycles plus the synthetic
/// down-payment and upfront-cash entries.
///
/// Produces exactly `ceil(installment_count / CYCLE_SIZE)` cycles; the last
/// cycle may be shorter than `CYCLE_SIZE`.
///
/// # Errors
///
/// Returns [`ContractError::MissingStartDate`] when the contract declares
/// installments but carries no start date, and
/// [`ContractError::NegativeAmount`] when a monetary term is negative.
pub fn build_schedule(contract: &Contract, today: NaiveDate) -> Result<Schedule, ContractError> {
    for (field, amount) in [
        ("monthly_amount", contract.monthly_amount),
        ("down_payment", contract.down_payment),
        ("upfront_cash", contract.upfront_cash),
    ] {
        if amount < Decimal::ZERO {
            return Err(ContractError::NegativeAmount { field, amount });
        }
    }

    let down_payment = synthetic_entry(
        ScheduleEntryKind::DownPayment,
        contract.down_payment,
        contract.start_date,
    );
    let upfront_cash = synthetic_entry(
        ScheduleEntryKind::UpfrontCash,
        contract.upfront_cash,
        contract.start_date,
    );

    if contract.installment_count == 0 {
        return Ok(Schedule {
            cycles: Vec::new(),
            down_payment,
            upfront_cash,
        });
    }

    let start = contract
        .start_date
        .ok_or(ContractError::MissingStartDate {
            installment_count: contract.installment_count,
        })?;

    let mut installments = Vec::with_capacity(contract.installment_count as usize);
    for sequence in 1..=contract.installment_count {
        let due_date = start
            .checked_add_months(Months::new(sequence))
            .ok_or(ContractError::DueDateOutOfRange { sequence })?;
        installments.push(Installment {
            sequence,
            due_date,
            amount: contract.monthly_amount,
            status: installment_status(sequence, due_date, contract.status, today),
        });
    }

    let cycles = installments
        .chunks(CYCLE_SIZE as usize)
        .enumerate()
        .map(|(index, chunk)| build_cycle(index as u32 + 1, chunk.to_vec()))
        .collect();

    Ok(Schedule {
        cycles,
        down_payment,
        upfront_cash,
    })
}

fn synthetic_entry(
    kind: ScheduleEntryKind,
    amount: Decimal,
    date: Option<NaiveDate>,
) -> Option<ScheduleEntry> {
    (amount > Decimal::ZERO).then_some(ScheduleEntry {
        kind,
        date,
        amount,
        status: InstallmentStatus::Paid,
    })
}

/// Derives the display status of one installment.
///
/// Deterministic in `(sequence, due_date, contract_status, today)`:
/// - a completed contract has settled every installment;
/// - the first [`SETTLED_LEAD_INSTALLMENTS`] of an active contract present
///   as settled;
/// - otherwise an installment is overdue once its due date has passed.
#[must_use]
pub fn installment_status(
    sequence: u32,
    due_date: NaiveDate,
    contract_status: ContractStatus,
    today: NaiveDate,
) -> InstallmentStatus {
    if contract_status == ContractStatus::Completed {
        InstallmentStatus::Paid
    } else if contract_status == ContractStatus::Active && sequence <= SETTLED_LEAD_INSTALLMENTS {
        InstallmentStatus::Paid
    } else if due_date < today {
        InstallmentStatus::Overdue
    } else {
        InstallmentStatus::Pending
    }
}

fn build_cycle(number: u32, installments: Vec<Installment>) -> Cycle {
    let total_count = u32::try_from(installments.len()).unwrap_or(u32::MAX);
    let paid: Vec<&Installment> = installments
        .iter()
        .filter(|i| i.status == InstallmentStatus::Paid)
        .collect();
    let paid_count = u32::try_from(paid.len()).unwrap_or(u32::MAX);
    let amount_paid = paid.iter().map(|i| i.amount).sum();
    let amount_total = installments.iter().map(|i| i.amount).sum();
    let any_overdue = installments
        .iter()
        .any(|i| i.status == InstallmentStatus::Overdue);

    Cycle {
        number,
        installments,
        paid_count,
        total_count,
        amount_paid,
        amount_total,
        status: cycle_status(paid_count, total_count, any_overdue),
    }
}

/// Derives the progress status of a cycle.
///
/// Precedence: all settled, then any overdue, then any settled, then pending.
#[must_use]
pub fn cycle_status(paid_count: u32, total_count: u32, any_overdue: bool) -> CycleStatus {
    if paid_count == total_count {
        CycleStatus::Completed
    } else if any_overdue {
        CycleStatus::HasOverdue
    } else if paid_count > 0 {
        CycleStatus::InProgress
    } else {
        CycleStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltp_shared::types::{ClientId, ContractId, LotId};
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_contract(installments: u32, start: Option<NaiveDate>) -> Contract {
        Contract {
            id: ContractId::new(),
            client_id: ClientId::new(),
            lot_id: LotId::new(),
            base_price: dec!(50000),
            down_payment: dec!(5000),
            upfront_cash: dec!(2000),
            installment_count: installments,
            monthly_amount: dec!(1000),
            start_date: start,
            status: ContractStatus::Active,
        }
    }

    #[test]
    fn test_seven_installments_make_two_cycles() {
        let contract = make_contract(7, Some(ymd(2024, 1, 1)));
        let schedule = build_schedule(&contract, ymd(2024, 3, 15)).unwrap();

        assert_eq!(schedule.cycles.len(), 2);
        assert_eq!(schedule.cycles[0].installments.len(), 6);
        assert_eq!(schedule.cycles[1].installments.len(), 1);
        assert_eq!(schedule.installment_count(), 7);

        // First two installments of an active contract present as settled.
        let statuses: Vec<InstallmentStatus> =
            schedule.installments().map(|i| i.status).collect();
        assert_eq!(statuses[0], InstallmentStatus::Paid);
        assert_eq!(statuses[1], InstallmentStatus::Paid);
        assert_eq!(statuses[2], InstallmentStatus::Pending);

        // Installment 7 is due seven calendar months after the start date.
        let last = schedule.installments().last().unwrap();
        assert_eq!(last.sequence, 7);
        assert_eq!(last.due_date, ymd(2024, 8, 1));
    }

    #[test]
    fn test_due_dates_use_calendar_months() {
        let contract = make_contract(2, Some(ymd(2024, 1, 31)));
        let schedule = build_schedule(&contract, ymd(2024, 1, 1)).unwrap();
        let dues: Vec<NaiveDate> = schedule.installments().map(|i| i.due_date).collect();

        // Month arithmetic clamps to the end of shorter months.
        assert_eq!(dues, vec![ymd(2024, 2, 29), ymd(2024, 3, 31)]);
    }

    #[test]
    fn test_past_due_installments_are_overdue() {
        let contract = make_contract(6, Some(ymd(2024, 1, 1)));
        let schedule = build_schedule(&contract, ymd(2024, 5, 2)).unwrap();
        let cycle = &schedule.cycles[0];

        // Seq 3 (due 2024-04-01) and seq 4 (due 2024-05-01) have passed.
        assert_eq!(cycle.installments[2].status, InstallmentStatus::Overdue);
        assert_eq!(cycle.installments[3].status, InstallmentStatus::Overdue);
        assert_eq!(cycle.installments[4].status, InstallmentStatus::Pending);
        assert_eq!(cycle.status, CycleStatus::HasOverdue);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let contract = make_contract(3, Some(ymd(2024, 1, 1)));
        let schedule = build_schedule(&contract, ymd(2024, 4, 1)).unwrap();
        let third = schedule.cycles[0].installments[2].clone();
        assert_eq!(third.due_date, ymd(2024, 4, 1));
        assert_eq!(third.status, InstallmentStatus::Pending);
    }

    #[test]
    fn test_completed_contract_settles_everything() {
        let mut contract = make_contract(13, Some(ymd(2020, 1, 1)));
        contract.status = ContractStatus::Completed;
        let schedule = build_schedule(&contract, ymd(2024, 1, 1)).unwrap();

        assert_eq!(schedule.cycles.len(), 3);
        for cycle in &schedule.cycles {
            assert_eq!(cycle.status, CycleStatus::Completed);
            assert_eq!(cycle.paid_count, cycle.total_count);
            assert_eq!(cycle.amount_paid, cycle.amount_total);
        }
    }

    #[test]
    fn test_defaulted_contract_has_no_settled_lead() {
        let mut contract = make_contract(4, Some(ymd(2024, 1, 1)));
        contract.status = ContractStatus::Defaulted;
        let schedule = build_schedule(&contract, ymd(2024, 3, 15)).unwrap();

        // Without the active-contract lead, seq 1-2 fall back to date rules.
        let statuses: Vec<InstallmentStatus> =
            schedule.installments().map(|i| i.status).collect();
        assert_eq!(statuses[0], InstallmentStatus::Overdue);
        assert_eq!(statuses[1], InstallmentStatus::Overdue);
        assert_eq!(statuses[2], InstallmentStatus::Pending);
    }

    #[test]
    fn test_cycle_aggregates() {
        let contract = make_contract(7, Some(ymd(2024, 1, 1)));
        let schedule = build_schedule(&contract, ymd(2024, 3, 15)).unwrap();
        let first = &schedule.cycles[0];

        assert_eq!(first.paid_count, 2);
        assert_eq!(first.total_count, 6);
        assert_eq!(first.amount_paid, dec!(2000));
        assert_eq!(first.amount_total, dec!(6000));
        assert_eq!(first.status, CycleStatus::InProgress);

        let second = &schedule.cycles[1];
        assert_eq!(second.paid_count, 0);
        assert_eq!(second.status, CycleStatus::Pending);
    }

    #[test]
    fn test_synthetic_entries() {
        let contract = make_contract(0, Some(ymd(2024, 1, 1)));
        let schedule = build_schedule(&contract, ymd(2024, 1, 1)).unwrap();

        assert!(schedule.cycles.is_empty());
        let down = schedule.down_payment.unwrap();
        assert_eq!(down.kind, ScheduleEntryKind::DownPayment);
        assert_eq!(down.date, Some(ymd(2024, 1, 1)));
        assert_eq!(down.amount, dec!(5000));
        assert_eq!(down.status, InstallmentStatus::Paid);

        let upfront = schedule.upfront_cash.unwrap();
        assert_eq!(upfront.kind, ScheduleEntryKind::UpfrontCash);
        assert_eq!(upfront.amount, dec!(2000));
    }

    #[test]
    fn test_zero_amounts_emit_no_synthetic_entries() {
        let mut contract = make_contract(3, Some(ymd(2024, 1, 1)));
        contract.down_payment = Decimal::ZERO;
        contract.upfront_cash = Decimal::ZERO;
        let schedule = build_schedule(&contract, ymd(2024, 1, 1)).unwrap();

        assert!(schedule.down_payment.is_none());
        assert!(schedule.upfront_cash.is_none());
    }

    #[test]
    fn test_missing_start_date_is_rejected() {
        let contract = make_contract(7, None);
        let err = build_schedule(&contract, ymd(2024, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            ContractError::MissingStartDate {
                installment_count: 7
            }
        ));
    }

    #[test]
    fn test_no_installments_need_no_start_date() {
        let contract = make_contract(0, None);
        let schedule = build_schedule(&contract, ymd(2024, 1, 1)).unwrap();
        assert!(schedule.cycles.is_empty());
        // Synthetic entries stay undated until the contract gets a start date.
        assert_eq!(schedule.down_payment.unwrap().date, None);
    }

    #[test]
    fn test_negative_terms_are_rejected() {
        let mut contract = make_contract(3, Some(ymd(2024, 1, 1)));
        contract.monthly_amount = dec!(-1000);
        let err = build_schedule(&contract, ymd(2024, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            ContractError::NegativeAmount {
                field: "monthly_amount",
                ..
            }
        ));
    }
}
