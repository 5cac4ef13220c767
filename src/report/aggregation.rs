//! Aggregation of a year's transactions by month and by category.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    category::{CategoryKey, CategoryLookup},
    timezone::DisplayTimezone,
    transaction::{Totals, Transaction, TransactionKind, TransactionRecord, parse_transactions},
};

/// The number of slots in a monthly series.
pub const MONTHS_PER_YEAR: usize = 12;

/// Income and expenses for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySlot {
    /// The sum of income in the month.
    pub income: Decimal,
    /// The sum of expenses in the month.
    pub expense: Decimal,
}

impl MonthlySlot {
    fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount.value(),
            TransactionKind::Expense => self.expense += transaction.amount.value(),
        }
    }
}

/// Income and expenses for one category bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// The bucket the totals belong to.
    pub key: CategoryKey,
    /// The display name of the bucket.
    pub name: String,
    /// The sum of income in the bucket.
    pub income: Decimal,
    /// The sum of expenses in the bucket.
    pub expense: Decimal,
}

impl CategorySummary {
    fn new(key: CategoryKey, name: String) -> Self {
        Self {
            key,
            name,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        }
    }

    fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount.value(),
            TransactionKind::Expense => self.expense += transaction.amount.value(),
        }
    }
}

/// A year's transactions reduced to twelve monthly slots and per-category buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodSummary {
    /// The year that was aggregated, `None` for the empty "no period" summary.
    pub year: Option<i32>,
    /// January to December, always twelve slots.
    pub monthly: [MonthlySlot; MONTHS_PER_YEAR],
    /// One bucket per category referenced in the year.
    pub categories: BTreeMap<CategoryKey, CategorySummary>,
}

impl PeriodSummary {
    /// The summary used when no period is selected: twelve zero slots and no categories.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Income, expense and balance over the whole period.
    pub fn totals(&self) -> Totals {
        let (income, expense) = self
            .monthly
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), slot| {
                (income + slot.income, expense + slot.expense)
            });

        Totals::new(income, expense)
    }

    /// The monthly slots paired with their month.
    pub fn months(&self) -> impl Iterator<Item = (Month, &MonthlySlot)> {
        let mut month = Month::December;
        self.monthly.iter().map(move |slot| {
            month = month.next();
            (month, slot)
        })
    }
}

/// Aggregate the transactions that fall within `year`.
///
/// A transaction falls within `year` if its date, read in `timezone`, does.
/// Each one is added to the slot for its month and to the bucket for its
/// category, which is named through `lookup`. Transactions without a category
/// go to the [CategoryKey::Uncategorized] bucket.
///
/// With no `year`, the result is [PeriodSummary::empty].
///
/// # Errors
/// Returns [Error::InvalidYear] if `year` is not a four digit year.
pub fn aggregate(
    transactions: &[Transaction],
    year: Option<i32>,
    lookup: &impl CategoryLookup,
    timezone: &DisplayTimezone,
) -> Result<PeriodSummary, Error> {
    let Some(year) = year else {
        return Ok(PeriodSummary::empty());
    };

    if !(1000..=9999).contains(&year) {
        return Err(Error::InvalidYear(year));
    }

    let mut summary = PeriodSummary {
        year: Some(year),
        ..Default::default()
    };

    for transaction in transactions {
        let local = timezone.to_local(transaction.occurred_at);
        if local.year() != year {
            continue;
        }

        let month_index = usize::from(u8::from(local.month())) - 1;
        summary.monthly[month_index].add(transaction);

        let key = transaction.category_key();
        summary
            .categories
            .entry(key)
            .or_insert_with_key(|key| CategorySummary::new(key.clone(), lookup.label_for(key)))
            .add(transaction);
    }

    tracing::debug!(
        "Aggregated {year}: {} categories from {} transactions",
        summary.categories.len(),
        transactions.len()
    );

    Ok(summary)
}

/// Validate store records and aggregate them.
///
/// A single malformed record fails the whole call rather than being skipped.
///
/// # Errors
/// Returns the first record validation error, or [Error::InvalidYear].
pub fn aggregate_records(
    records: &[TransactionRecord],
    year: Option<i32>,
    lookup: &impl CategoryLookup,
    timezone: &DisplayTimezone,
) -> Result<PeriodSummary, Error> {
    let transactions = parse_transactions(records, timezone)?;
    aggregate(&transactions, year, lookup, timezone)
}

/// The three-letter English abbreviation of `month`, for chart axes.
pub fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{
        Month, OffsetDateTime,
        macros::{datetime, offset},
    };

    use crate::{
        Error,
        category::{CategoryId, CategoryKey, UNCATEGORIZED_LABEL},
        report::aggregation::{MonthlySlot, PeriodSummary, aggregate, aggregate_records, month_label},
        timezone::DisplayTimezone,
        transaction::{Amount, Totals, Transaction, TransactionKind, TransactionRecord},
    };

    fn create_test_transaction(
        kind: TransactionKind,
        amount: Decimal,
        occurred_at: OffsetDateTime,
        category: Option<&str>,
    ) -> Transaction {
        Transaction::build(Amount::new(amount).unwrap(), kind, occurred_at)
            .category_id(category.map(CategoryId::new))
            .finalize()
    }

    fn names() -> HashMap<CategoryId, String> {
        HashMap::from([
            (CategoryId::new("food"), "Food".to_owned()),
            (CategoryId::new("salary"), "Salary".to_owned()),
        ])
    }

    fn sample() -> Vec<Transaction> {
        vec![
            create_test_transaction(
                TransactionKind::Income,
                dec!(1000),
                datetime!(2024-01-05 9:00 UTC),
                Some("salary"),
            ),
            create_test_transaction(
                TransactionKind::Expense,
                dec!(400),
                datetime!(2024-01-20 18:00 UTC),
                Some("food"),
            ),
            create_test_transaction(
                TransactionKind::Expense,
                dec!(200),
                datetime!(2023-02-10 12:00 UTC),
                Some("food"),
            ),
            create_test_transaction(
                TransactionKind::Expense,
                dec!(35.50),
                datetime!(2024-07-01 12:00 UTC),
                None,
            ),
            create_test_transaction(
                TransactionKind::Expense,
                dec!(12.25),
                datetime!(2024-07-02 12:00 UTC),
                Some("deleted-category"),
            ),
        ]
    }

    #[test]
    fn sums_january_income_and_expense() {
        let transactions = &sample()[..3];

        let got = aggregate(
            transactions,
            Some(2024),
            &names(),
            &DisplayTimezone::default(),
        )
        .unwrap();

        assert_eq!(
            got.monthly[0],
            MonthlySlot {
                income: dec!(1000),
                expense: dec!(400)
            }
        );
        assert!(got.monthly[1..].iter().all(|slot| *slot == MonthlySlot::default()));
        assert_eq!(got.totals().balance, dec!(600));
    }

    #[test]
    fn always_has_twelve_slots() {
        let got = aggregate(&[], Some(2024), &names(), &DisplayTimezone::default()).unwrap();

        assert_eq!(got.monthly.len(), 12);
        assert!(got.categories.is_empty());
        assert_eq!(got.totals(), Totals::default());
    }

    #[test]
    fn no_year_gives_empty_summary() {
        let got = aggregate(&sample(), None, &names(), &DisplayTimezone::default()).unwrap();

        assert_eq!(got, PeriodSummary::empty());
    }

    #[test]
    fn rejects_years_that_are_not_four_digits() {
        let got = aggregate(&sample(), Some(24), &names(), &DisplayTimezone::default());

        assert_eq!(got, Err(Error::InvalidYear(24)));
    }

    #[test]
    fn buckets_by_category_with_fallback_names() {
        let got = aggregate(&sample(), Some(2024), &names(), &DisplayTimezone::default()).unwrap();

        let food = &got.categories[&CategoryKey::Category(CategoryId::new("food"))];
        assert_eq!(food.name, "Food");
        assert_eq!(food.expense, dec!(400));

        let uncategorized = &got.categories[&CategoryKey::Uncategorized];
        assert_eq!(uncategorized.name, UNCATEGORIZED_LABEL);
        assert_eq!(uncategorized.expense, dec!(35.50));

        let unknown = &got.categories[&CategoryKey::Category(CategoryId::new("deleted-category"))];
        assert_eq!(unknown.name, UNCATEGORIZED_LABEL);
        assert_eq!(unknown.expense, dec!(12.25));
    }

    #[test]
    fn monthly_total_matches_transactions_in_year() {
        let transactions = sample();
        let want: Decimal = transactions
            .iter()
            .filter(|t| t.occurred_at.year() == 2024)
            .map(|t| t.amount.value())
            .sum();

        let got = aggregate(&transactions, Some(2024), &names(), &DisplayTimezone::default())
            .unwrap();
        let monthly_sum: Decimal = got.monthly.iter().map(|s| s.income + s.expense).sum();

        assert_eq!(monthly_sum, want);
    }

    #[test]
    fn category_totals_match_monthly_totals() {
        let got = aggregate(&sample(), Some(2024), &names(), &DisplayTimezone::default()).unwrap();

        let category_income: Decimal = got.categories.values().map(|c| c.income).sum();
        let category_expense: Decimal = got.categories.values().map(|c| c.expense).sum();
        let totals = got.totals();

        assert_eq!(category_income, totals.income);
        assert_eq!(category_expense, totals.expense);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let transactions = sample();
        let timezone = DisplayTimezone::default();

        let first = aggregate(&transactions, Some(2024), &names(), &timezone).unwrap();
        let second = aggregate(&transactions, Some(2024), &names(), &timezone).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn year_boundary_follows_display_timezone() {
        let transactions = vec![create_test_transaction(
            TransactionKind::Expense,
            dec!(50),
            datetime!(2023-12-31 20:00 UTC),
            None,
        )];

        let in_utc =
            aggregate(&transactions, Some(2024), &names(), &DisplayTimezone::default()).unwrap();
        let in_bangkok = aggregate(
            &transactions,
            Some(2024),
            &names(),
            &DisplayTimezone::Fixed(offset!(+7)),
        )
        .unwrap();

        assert_eq!(in_utc.totals().expense, dec!(0));
        assert_eq!(in_bangkok.monthly[0].expense, dec!(50));
    }

    #[test]
    fn records_with_bad_amount_fail_the_whole_call() {
        let records = vec![
            TransactionRecord {
                id: "1".to_owned(),
                amount: 100.0,
                kind: TransactionKind::Income,
                date: "2024-01-01".to_owned(),
                note: None,
                category_id: None,
            },
            TransactionRecord {
                id: "2".to_owned(),
                amount: -3.0,
                kind: TransactionKind::Expense,
                date: "2024-01-02".to_owned(),
                note: None,
                category_id: None,
            },
        ];

        let got = aggregate_records(&records, Some(2024), &names(), &DisplayTimezone::default());

        assert!(matches!(got, Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn months_are_labelled_in_order() {
        let summary = PeriodSummary::empty();

        let labels: Vec<&str> = summary.months().map(|(month, _)| month_label(month)).collect();

        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Jan");
        assert_eq!(labels[11], "Dec");
        assert_eq!(month_label(Month::June), "Jun");
    }
}
