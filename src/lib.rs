//! Ledger Report turns a snapshot of personal-finance transactions into the
//! derived views a budgeting client shows: monthly income/expense series for a
//! year, a category rollup compared across two years, and paginated transaction
//! lists with totals.
//!
//! The engine is pure. Callers fetch transactions and categories however they
//! like, decode them into [TransactionRecord] and [CategoryRecord], and hand the
//! resolved collections to the functions in this crate.

#![warn(missing_docs)]

mod category;
mod config;
mod format;
mod pagination;
mod report;
mod timezone;
mod transaction;

pub use category::{
    Category, CategoryDirectory, CategoryId, CategoryKey, CategoryLookup, CategoryRecord,
    UNCATEGORIZED_LABEL,
};
pub use config::ReportConfig;
pub use format::format_currency;
pub use pagination::{
    PaginationConfig, PaginationIndicator, clamp_page, count_pages, create_pagination_indicators,
};
pub use report::{
    CategorySummary, ComparisonRow, ExpenseShare, MONTHS_PER_YEAR, MonthlySlot, PeriodSummary,
    YearReport, aggregate, aggregate_records, available_years, combine, compare_year_options,
    month_label, rank_expenses,
};
pub use timezone::DisplayTimezone;
pub use transaction::{
    Amount, CategoryFilter, ListState, Totals, Transaction, TransactionBuilder, TransactionId,
    TransactionKind, TransactionPage, TransactionRecord, parse_transactions, view,
};

/// The errors that may occur while building reports.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction amount was negative, NaN or infinite.
    ///
    /// Amounts are stored unsigned, the direction of the money is given by the
    /// transaction kind.
    #[error("transaction \"{id}\" has an invalid amount {amount}, amounts must be finite and non-negative")]
    InvalidAmount {
        /// The ID of the offending transaction.
        id: String,
        /// The amount as it was received.
        amount: f64,
    },

    /// The date of a transaction could not be parsed as an ISO-8601 date or date-time.
    #[error("transaction \"{id}\" has an invalid date \"{date}\"")]
    InvalidDate {
        /// The ID of the offending transaction.
        id: String,
        /// The date string as it was received.
        date: String,
    },

    /// A report year was requested that is not a four digit calendar year.
    #[error("{0} is not a four digit calendar year")]
    InvalidYear(i32),

    /// Pages must hold at least one transaction.
    #[error("the page size must be greater than zero")]
    InvalidPageSize,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}
