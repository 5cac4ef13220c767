//! The years a report can be run for.

use std::collections::BTreeSet;

use crate::{timezone::DisplayTimezone, transaction::Transaction};

/// The distinct years that have transactions, newest first.
pub fn available_years(transactions: &[Transaction], timezone: &DisplayTimezone) -> Vec<i32> {
    let years: BTreeSet<i32> = transactions
        .iter()
        .map(|transaction| timezone.to_local(transaction.occurred_at).year())
        .collect();

    years.into_iter().rev().collect()
}

/// The years that can be compared against `primary_year`.
pub fn compare_year_options(available_years: &[i32], primary_year: i32) -> Vec<i32> {
    available_years
        .iter()
        .copied()
        .filter(|&year| year != primary_year)
        .collect()
}
