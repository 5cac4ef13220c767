//! Filtering, paging and totalling of transaction lists.
//!
//! [view] is a pure function of the transactions, the page size, the requested
//! page and the category filter. The page and filter the user has selected
//! live in a [ListState] owned by the caller.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    Error,
    category::CategoryId,
    pagination::{clamp_page, count_pages},
    transaction::core::{Transaction, TransactionKind},
};

/// Restricts a transaction list to one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep transactions in this category only.
    Only(CategoryId),
}

impl CategoryFilter {
    /// Build a filter from a query value, where a missing or blank value means [CategoryFilter::All].
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() => Self::Only(CategoryId::new(id)),
            _ => Self::All,
        }
    }

    /// Whether `transaction` passes the filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => transaction.category_id.as_ref() == Some(id),
        }
    }
}

/// Income, expense and balance over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// The sum of all income.
    pub income: Decimal,
    /// The sum of all expenses.
    pub expense: Decimal,
    /// Income minus expenses, may be negative.
    pub balance: Decimal,
}

impl Totals {
    /// Build totals from income and expense sums.
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Sum the income and expenses of `transactions`.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (income, expense) = transactions.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), transaction| match transaction.kind {
                TransactionKind::Income => (income + transaction.amount.value(), expense),
                TransactionKind::Expense => (income, expense + transaction.amount.value()),
            },
        );

        Self::new(income, expense)
    }
}

/// One page of a filtered transaction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage<'a> {
    /// The transactions on this page, in input order.
    pub transactions: Vec<&'a Transaction>,
    /// The page that was actually returned, after clamping, starting at 1.
    pub page_number: u64,
    /// The number of pages in the filtered list, at least 1.
    pub total_pages: u64,
    /// The number of transactions that passed the filter.
    pub filtered_count: usize,
    /// Totals over every transaction that passed the filter, not just this page.
    pub totals: Totals,
}

/// Filter `transactions`, total the result and cut out one page.
///
/// Out of range page numbers are clamped to the first or last page. An empty
/// list is a single empty page.
///
/// # Errors
/// Returns [Error::InvalidPageSize] if `page_size` is zero.
pub fn view<'a>(
    transactions: &'a [Transaction],
    page_size: u64,
    page_number: u64,
    filter: &CategoryFilter,
) -> Result<TransactionPage<'a>, Error> {
    if page_size == 0 {
        return Err(Error::InvalidPageSize);
    }

    let filtered: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .collect();

    let totals = Totals::from_transactions(filtered.iter().copied());
    let total_pages = count_pages(filtered.len() as u64, page_size);
    let clamped_page = clamp_page(page_number, total_pages);

    if clamped_page != page_number {
        tracing::debug!(
            "Clamped page {page_number} to {clamped_page} of {total_pages} for filter {filter:?}"
        );
    }

    let start = ((clamped_page - 1) * page_size) as usize;
    let end = start.saturating_add(page_size as usize).min(filtered.len());
    let page = filtered[start.min(end)..end].to_vec();

    Ok(TransactionPage {
        transactions: page,
        page_number: clamped_page,
        total_pages,
        filtered_count: filtered.len(),
        totals,
    })
}

/// The page and category filter a list screen has selected.
///
/// Changing the filter always goes back to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page: u64,
    category_filter: CategoryFilter,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            category_filter: CategoryFilter::All,
        }
    }
}

impl ListState {
    /// Start on the first page with no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected page, starting at 1.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The selected filter.
    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    /// Select a new filter and go back to page 1.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
        self.page = 1;
    }

    /// Go to `page`, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: u64, total_pages: u64) {
        self.page = clamp_page(page, total_pages);
    }

    /// Go to the next page, staying on the last page.
    pub fn next(&mut self, total_pages: u64) {
        self.go_to(self.page.saturating_add(1), total_pages);
    }

    /// Go to the previous page, staying on the first page.
    pub fn previous(&mut self, total_pages: u64) {
        self.go_to(self.page.saturating_sub(1), total_pages);
    }

    /// Render the selected page and remember the page that was actually shown.
    ///
    /// # Errors
    /// Returns [Error::InvalidPageSize] if `page_size` is zero.
    pub fn view<'a>(
        &mut self,
        transactions: &'a [Transaction],
        page_size: u64,
    ) -> Result<TransactionPage<'a>, Error> {
        let page = view(transactions, page_size, self.page, &self.category_filter)?;
        self.page = page.page_number;
        Ok(page)
    }
}
