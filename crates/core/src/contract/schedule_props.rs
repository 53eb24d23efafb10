//! Property-based tests for the schedule builder.

use chrono::{Months, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::schedule::{CYCLE_SIZE, build_schedule};
use super::types::{Contract, ContractStatus, CycleStatus, InstallmentStatus};
use ltp_shared::types::{ClientId, ContractId, LotId};

/// Strategy for dates across several years, including month-end days.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2035, 1u32..=12, 1u32..=31).prop_filter_map("invalid date", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

/// Strategy for non-negative amounts in cents.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn status_strategy() -> impl Strategy<Value = ContractStatus> {
    prop_oneof![
        Just(ContractStatus::Active),
        Just(ContractStatus::Completed),
        Just(ContractStatus::Defaulted),
        Just(ContractStatus::Rescinded),
        Just(ContractStatus::Cancelled),
    ]
}

fn contract_strategy() -> impl Strategy<Value = Contract> {
    (
        0u32..=60,
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
        date_strategy(),
        status_strategy(),
    )
        .prop_map(
            |(installment_count, monthly_amount, down_payment, upfront_cash, start, status)| {
                Contract {
                    id: ContractId::new(),
                    client_id: ClientId::new(),
                    lot_id: LotId::new(),
                    base_price: monthly_amount * Decimal::from(installment_count),
                    down_payment,
                    upfront_cash,
                    installment_count,
                    monthly_amount,
                    start_date: Some(start),
                    status,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A contract with N installments yields exactly ceil(N / 6) cycles,
    /// and the installment counts across cycles sum back to N.
    #[test]
    fn prop_cycle_partition(contract in contract_strategy(), today in date_strategy()) {
        let schedule = build_schedule(&contract, today).unwrap();

        let expected_cycles = contract.installment_count.div_ceil(CYCLE_SIZE);
        prop_assert_eq!(schedule.cycles.len(), expected_cycles as usize);

        let total: usize = schedule.cycles.iter().map(|c| c.installments.len()).sum();
        prop_assert_eq!(total, contract.installment_count as usize);

        for cycle in &schedule.cycles {
            prop_assert!(cycle.installments.len() <= CYCLE_SIZE as usize);
            prop_assert!(!cycle.installments.is_empty());
        }
    }

    /// Cycle aggregates are consistent: paid never exceeds total, and a
    /// cycle is COMPLETED exactly when every installment is settled.
    #[test]
    fn prop_cycle_aggregates(contract in contract_strategy(), today in date_strategy()) {
        let schedule = build_schedule(&contract, today).unwrap();

        for cycle in &schedule.cycles {
            prop_assert!(cycle.paid_count <= cycle.total_count);
            prop_assert!(cycle.amount_paid <= cycle.amount_total);
            prop_assert_eq!(
                cycle.status == CycleStatus::Completed,
                cycle.paid_count == cycle.total_count
            );
        }
    }

    /// Due dates advance by whole calendar months from the start date.
    #[test]
    fn prop_due_dates_are_calendar_months(
        contract in contract_strategy(),
        today in date_strategy(),
    ) {
        let schedule = build_schedule(&contract, today).unwrap();
        let start = contract.start_date.unwrap();

        for installment in schedule.installments() {
            let expected = start
                .checked_add_months(Months::new(installment.sequence))
                .unwrap();
            prop_assert_eq!(installment.due_date, expected);
            prop_assert_eq!(installment.amount, contract.monthly_amount);
        }
    }

    /// Sequence numbers are contiguous 1..=N across cycles.
    #[test]
    fn prop_sequences_contiguous(contract in contract_strategy(), today in date_strategy()) {
        let schedule = build_schedule(&contract, today).unwrap();
        let sequences: Vec<u32> = schedule.installments().map(|i| i.sequence).collect();
        let expected: Vec<u32> = (1..=contract.installment_count).collect();
        prop_assert_eq!(sequences, expected);
    }

    /// A completed contract settles every installment; no other status
    /// produces an overdue entry dated in the future.
    #[test]
    fn prop_status_rules(contract in contract_strategy(), today in date_strategy()) {
        let schedule = build_schedule(&contract, today).unwrap();

        for installment in schedule.installments() {
            match installment.status {
                InstallmentStatus::Paid => prop_assert!(
                    contract.status == ContractStatus::Completed
                        || (contract.status == ContractStatus::Active
                            && installment.sequence <= 2)
                ),
                InstallmentStatus::Overdue => prop_assert!(installment.due_date < today),
                InstallmentStatus::Pending => prop_assert!(installment.due_date >= today),
            }
        }
    }

    /// The builder is deterministic.
    #[test]
    fn prop_deterministic(contract in contract_strategy(), today in date_strategy()) {
        let a = build_schedule(&contract, today).unwrap();
        let b = build_schedule(&contract, today).unwrap();
        prop_assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }
}
