//! Side-by-side category tables for a primary and a compare period.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    category::{CategoryKey, UNCATEGORIZED_LABEL},
    report::aggregation::{CategorySummary, PeriodSummary},
};

/// One category's totals in the primary and the compare period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    /// The category bucket.
    pub key: CategoryKey,
    /// The display name, taken from the primary period when it has the category.
    pub name: String,
    /// Income in the primary period.
    pub primary_income: Decimal,
    /// Expenses in the primary period.
    pub primary_expense: Decimal,
    /// Income in the compare period.
    pub compare_income: Decimal,
    /// Expenses in the compare period.
    pub compare_expense: Decimal,
}

/// A category's slice of the primary period's expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseShare {
    /// The category bucket.
    pub key: CategoryKey,
    /// The display name of the bucket.
    pub name: String,
    /// Expenses in the bucket.
    pub expense: Decimal,
    /// `expense` divided by the total of all ranked expenses, between 0 and 1.
    pub share: Decimal,
}

/// Merge the category buckets of two periods into one row per category.
///
/// Every category from either period appears exactly once. Columns for a
/// period that has no transactions in the category are zero. Pass
/// [PeriodSummary::empty] as `compare` when there is no compare period.
///
/// Rows are ordered by category key, with the uncategorized bucket last.
pub fn combine(primary: &PeriodSummary, compare: &PeriodSummary) -> Vec<ComparisonRow> {
    let keys: BTreeSet<&CategoryKey> = primary
        .categories
        .keys()
        .chain(compare.categories.keys())
        .collect();

    keys.into_iter()
        .map(|key| {
            let primary_bucket = primary.categories.get(key);
            let compare_bucket = compare.categories.get(key);

            ComparisonRow {
                key: key.clone(),
                name: resolve_name(primary_bucket, compare_bucket),
                primary_income: primary_bucket.map_or(Decimal::ZERO, |c| c.income),
                primary_expense: primary_bucket.map_or(Decimal::ZERO, |c| c.expense),
                compare_income: compare_bucket.map_or(Decimal::ZERO, |c| c.income),
                compare_expense: compare_bucket.map_or(Decimal::ZERO, |c| c.expense),
            }
        })
        .collect()
}

fn resolve_name(primary: Option<&CategorySummary>, compare: Option<&CategorySummary>) -> String {
    [primary, compare]
        .into_iter()
        .flatten()
        .map(|bucket| bucket.name.as_str())
        .find(|name| !name.is_empty())
        .unwrap_or(UNCATEGORIZED_LABEL)
        .to_owned()
}

/// Rank the categories of a period by expense, largest first.
///
/// Categories without expenses are left out. Equal expenses are ordered by
/// category key so the ranking is stable between calls.
pub fn rank_expenses(summary: &PeriodSummary) -> Vec<ExpenseShare> {
    let mut ranked: Vec<&CategorySummary> = summary
        .categories
        .values()
        .filter(|bucket| bucket.expense > Decimal::ZERO)
        .collect();

    ranked.sort_by(|a, b| b.expense.cmp(&a.expense).then_with(|| a.key.cmp(&b.key)));

    let total: Decimal = ranked.iter().map(|bucket| bucket.expense).sum();

    ranked
        .into_iter()
        .map(|bucket| ExpenseShare {
            key: bucket.key.clone(),
            name: bucket.name.clone(),
            expense: bucket.expense,
            share: bucket.expense / total,
        })
        .collect()
}
