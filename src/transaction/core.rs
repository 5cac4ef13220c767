//! Defines the core data models for transactions.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::category::{CategoryId, CategoryKey};

// ============================================================================
// MODELS
// ============================================================================

/// The opaque identifier of a transaction, as issued by the transaction store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a transaction ID.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

/// A non-negative amount of money.
///
/// The direction of the money is given by [TransactionKind], so amounts are
/// never negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount, or `None` if `value` is negative.
    pub fn new(value: Decimal) -> Option<Self> {
        (value >= Decimal::ZERO).then_some(Self(value))
    }

    /// Create an amount from a decoded JSON number.
    ///
    /// Returns `None` for negative, NaN and infinite values.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }

        Decimal::try_from(value).ok().and_then(Self::new)
    }

    /// The amount as a decimal.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] or convert a
/// [TransactionRecord](crate::TransactionRecord) with [Transaction::try_from_record].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub note: Option<String>,
    /// The ID of the category the transaction belongs to.
    pub category_id: Option<CategoryId>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: Amount,
        kind: TransactionKind,
        occurred_at: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: None,
            amount,
            kind,
            occurred_at,
            note: None,
            category_id: None,
        }
    }

    /// The bucket this transaction is totalled under.
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::from_optional(self.category_id.as_ref())
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```
/// use ledger_report::{Amount, Transaction, TransactionKind};
/// use rust_decimal::Decimal;
/// use time::macros::datetime;
///
/// let transaction = Transaction::build(
///         Amount::new(Decimal::new(4599, 2)).unwrap(),
///         TransactionKind::Expense,
///         datetime!(2025-01-15 9:30 UTC),
///     )
///     .id("tx-1")
///     .note("Coffee")
///     .category_id(Some("food".into()))
///     .finalize();
///
/// assert_eq!(transaction.amount.to_string(), "45.99");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID to give the transaction, an empty ID is used if unset.
    pub id: Option<TransactionId>,
    /// The amount of money spent or earned.
    pub amount: Amount,
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub occurred_at: OffsetDateTime,
    /// An optional note, e.g. "Weekly groceries".
    pub note: Option<String>,
    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category_id: Option<CategoryId>,
}

impl TransactionBuilder {
    /// Set the ID for the transaction.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(TransactionId::new(id));
        self
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_owned());
        self
    }

    /// Set the category id for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Create the [Transaction].
    pub fn finalize(self) -> Transaction {
        Transaction {
            id: self.id.unwrap_or_else(|| TransactionId::new("")),
            amount: self.amount,
            kind: self.kind,
            occurred_at: self.occurred_at,
            note: self.note,
            category_id: self.category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use crate::{
        category::{CategoryId, CategoryKey},
        transaction::core::{Amount, Transaction, TransactionKind},
    };

    #[test]
    fn amount_rejects_negative_values() {
        assert_eq!(Amount::new(dec!(-0.01)), None);
        assert_eq!(Amount::new(dec!(0)).map(Amount::value), Some(dec!(0)));
    }

    #[test]
    fn amount_rejects_non_finite_floats() {
        assert_eq!(Amount::from_f64(f64::NAN), None);
        assert_eq!(Amount::from_f64(f64::INFINITY), None);
        assert_eq!(Amount::from_f64(-1.0), None);
    }

    #[test]
    fn amount_keeps_float_value() {
        let amount = Amount::from_f64(1234.5).unwrap();

        assert_eq!(amount.value(), dec!(1234.5));
    }

    #[test]
    fn builder_sets_optional_fields() {
        let transaction = Transaction::build(
            Amount::new(dec!(12)).unwrap(),
            TransactionKind::Income,
            datetime!(2024-03-01 12:00 UTC),
        )
        .id("abc")
        .note("Refund")
        .category_id(Some(CategoryId::new("c1")))
        .finalize();

        assert_eq!(transaction.id.as_ref(), "abc");
        assert_eq!(transaction.note.as_deref(), Some("Refund"));
        assert_eq!(
            transaction.category_key(),
            CategoryKey::Category(CategoryId::new("c1"))
        );
    }

    #[test]
    fn missing_category_is_uncategorized() {
        let transaction = Transaction::build(
            Amount::new(dec!(12)).unwrap(),
            TransactionKind::Expense,
            datetime!(2024-03-01 12:00 UTC),
        )
        .finalize();

        assert_eq!(transaction.category_key(), CategoryKey::Uncategorized);
    }
}
