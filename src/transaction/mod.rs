//! Transactions and transaction lists.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Validation of records received from the transaction store
//! - Filtering, paging and totalling for list screens

mod core;
mod listing;
mod record;

pub use core::{Amount, Transaction, TransactionBuilder, TransactionId, TransactionKind};
pub use listing::{CategoryFilter, ListState, Totals, TransactionPage, view};
pub use record::{TransactionRecord, parse_transactions};
