//! Property-based tests for the statement aggregator.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::ledger::{build_statement, statement_totals};
use super::types::{ContractedServiceCharge, Loan, LoanInstallment, PaymentRecord, Schedule};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn optional_date_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![3 => date_strategy().prop_map(Some), 1 => Just(None)]
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Signed amounts, for adjustments.
fn signed_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn service_strategy() -> impl Strategy<Value = ContractedServiceCharge> {
    (amount_strategy(), optional_date_strategy(), any::<bool>()).prop_map(
        |(base_price, date, has_agreed)| ContractedServiceCharge {
            name: "Servicio".to_string(),
            agreed_price: has_agreed.then_some(base_price / Decimal::TWO),
            base_price,
            date,
            status: "PENDIENTE".to_string(),
        },
    )
}

fn loan_strategy() -> impl Strategy<Value = Loan> {
    (
        proptest::option::of((optional_date_strategy(), amount_strategy())),
        prop::collection::vec((date_strategy(), amount_strategy()), 0..4),
    )
        .prop_map(|(disbursement, installments)| {
            let (disbursement_date, disbursement_amount) = match disbursement {
                Some((date, amount)) => (date, Some(amount)),
                None => (None, None),
            };
            Loan {
                description: "préstamo".to_string(),
                disbursement_date,
                disbursement_amount,
                installments: installments
                    .into_iter()
                    .enumerate()
                    .map(|(i, (due_date, amount))| LoanInstallment {
                        sequence: i as u32 + 1,
                        due_date,
                        amount,
                        status: "PENDIENTE".to_string(),
                    })
                    .collect(),
            }
        })
}

fn payment_strategy() -> impl Strategy<Value = PaymentRecord> {
    (
        prop_oneof![
            Just("PAGO CUOTA"),
            Just("PAGO SERVICIO"),
            Just("PAGO PRESTAMO"),
            Just("AJUSTE"),
        ],
        signed_amount_strategy(),
        optional_date_strategy(),
    )
        .prop_filter_map("non-adjustments must be positive", |(kind, amount, date)| {
            if kind != "AJUSTE" && amount <= Decimal::ZERO {
                return None;
            }
            Some(PaymentRecord {
                kind: kind.to_string(),
                description: kind.to_string(),
                amount,
                date,
                status: "CONFIRMADO".to_string(),
            })
        })
}

fn empty_schedule() -> Schedule {
    Schedule {
        cycles: Vec::new(),
        down_payment: None,
        upfront_cash: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The closing running balance equals total debits minus total credits.
    #[test]
    fn prop_closing_balance(
        services in prop::collection::vec(service_strategy(), 0..5),
        loans in prop::collection::vec(loan_strategy(), 0..3),
        payments in prop::collection::vec(payment_strategy(), 0..8),
        today in date_strategy(),
    ) {
        let entries = build_statement(&empty_schedule(), &services, &loans, &payments, today);
        let totals = statement_totals(&entries);

        prop_assert_eq!(totals.closing_balance, totals.debit_total - totals.credit_total);
        if let Some(last) = entries.last() {
            prop_assert_eq!(last.balance, totals.closing_balance);
        }
    }

    /// The running balance rises exactly at entries whose debit exceeds
    /// their credit, and falls exactly where credit exceeds debit.
    #[test]
    fn prop_balance_steps_follow_entry_sign(
        services in prop::collection::vec(service_strategy(), 0..5),
        loans in prop::collection::vec(loan_strategy(), 0..3),
        payments in prop::collection::vec(payment_strategy(), 0..8),
        today in date_strategy(),
    ) {
        let entries = build_statement(&empty_schedule(), &services, &loans, &payments, today);

        let mut previous = Decimal::ZERO;
        for entry in &entries {
            let step = entry.balance - previous;
            prop_assert_eq!(step, entry.debit - entry.credit);
            match step.cmp(&Decimal::ZERO) {
                std::cmp::Ordering::Greater => prop_assert!(entry.debit > entry.credit),
                std::cmp::Ordering::Less => prop_assert!(entry.debit < entry.credit),
                std::cmp::Ordering::Equal => prop_assert_eq!(entry.debit, entry.credit),
            }
            previous = entry.balance;
        }
    }

    /// Entries come out sorted: dated rows ascending, undated rows last.
    #[test]
    fn prop_sorted_by_date(
        services in prop::collection::vec(service_strategy(), 0..5),
        loans in prop::collection::vec(loan_strategy(), 0..3),
        payments in prop::collection::vec(payment_strategy(), 0..8),
        today in date_strategy(),
    ) {
        let entries = build_statement(&empty_schedule(), &services, &loans, &payments, today);

        let mut seen_undated = false;
        let mut last_date: Option<NaiveDate> = None;
        for entry in &entries {
            match entry.date {
                Some(date) => {
                    prop_assert!(!seen_undated, "dated row after undated rows");
                    if let Some(previous) = last_date {
                        prop_assert!(previous <= date);
                    }
                    last_date = Some(date);
                }
                None => seen_undated = true,
            }
        }
    }

    /// Every entry books on exactly one side of the statement.
    #[test]
    fn prop_single_sided_entries(
        services in prop::collection::vec(service_strategy(), 0..5),
        loans in prop::collection::vec(loan_strategy(), 0..3),
        payments in prop::collection::vec(payment_strategy(), 0..8),
        today in date_strategy(),
    ) {
        let entries = build_statement(&empty_schedule(), &services, &loans, &payments, today);

        for entry in &entries {
            prop_assert!(entry.debit >= Decimal::ZERO);
            prop_assert!(entry.credit >= Decimal::ZERO);
            prop_assert!(
                entry.debit == Decimal::ZERO || entry.credit == Decimal::ZERO,
                "entry books both debit and credit"
            );
        }
    }
}
