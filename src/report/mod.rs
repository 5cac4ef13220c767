//! Yearly reports
//!
//! Reduces transactions to monthly series and category rollups for a primary
//! year, and compares them against an optional second year.

mod aggregation;
mod comparison;
mod years;

pub use aggregation::{
    CategorySummary, MONTHS_PER_YEAR, MonthlySlot, PeriodSummary, aggregate, aggregate_records,
    month_label,
};
pub use comparison::{ComparisonRow, ExpenseShare, combine, rank_expenses};
pub use years::{available_years, compare_year_options};

use serde::Serialize;

use crate::{
    Error, category::CategoryLookup, timezone::DisplayTimezone, transaction::Totals,
    transaction::Transaction,
};

/// Everything the reports screen shows for a primary year and an optional compare year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearReport {
    /// The year being reported on.
    pub primary_year: i32,
    /// The year being compared against, if any.
    pub compare_year: Option<i32>,
    /// The years with transactions, newest first.
    pub available_years: Vec<i32>,
    /// January to December for the primary year.
    pub primary_monthly: [MonthlySlot; MONTHS_PER_YEAR],
    /// January to December for the compare year, all zero without a compare year.
    pub compare_monthly: [MonthlySlot; MONTHS_PER_YEAR],
    /// Totals over the primary year.
    pub primary_totals: Totals,
    /// Totals over the compare year, zero without a compare year.
    pub compare_totals: Totals,
    /// One row per category seen in either year.
    pub rows: Vec<ComparisonRow>,
    /// The primary year's expenses by category, largest first.
    pub expense_ranking: Vec<ExpenseShare>,
}

impl YearReport {
    /// Build the report for `primary_year`, compared against `compare_year` if given.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if either year is not a four digit year.
    pub fn build(
        transactions: &[Transaction],
        lookup: &impl CategoryLookup,
        primary_year: i32,
        compare_year: Option<i32>,
        timezone: &DisplayTimezone,
    ) -> Result<Self, Error> {
        let primary = aggregate(transactions, Some(primary_year), lookup, timezone)?;
        let compare = aggregate(transactions, compare_year, lookup, timezone)?;

        Ok(Self {
            primary_year,
            compare_year,
            available_years: available_years(transactions, timezone),
            primary_monthly: primary.monthly,
            compare_monthly: compare.monthly,
            primary_totals: primary.totals(),
            compare_totals: compare.totals(),
            rows: combine(&primary, &compare),
            expense_ranking: rank_expenses(&primary),
        })
    }

    /// The years offered for comparison against the primary year.
    pub fn compare_year_options(&self) -> Vec<i32> {
        compare_year_options(&self.available_years, self.primary_year)
    }
}
