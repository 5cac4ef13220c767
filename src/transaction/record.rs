//! Conversion of transaction store records into validated [Transaction]s.

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time,
    format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error,
    category::CategoryId,
    timezone::DisplayTimezone,
    transaction::core::{Amount, Transaction, TransactionId, TransactionKind},
};

/// A transaction as received from the transaction store.
///
/// Nothing about a record is trusted until it has been converted with
/// [Transaction::try_from_record].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The ID of the transaction. Document stores send this as `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    /// The amount of money, must be finite and non-negative.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// An ISO-8601 date-time, or a plain date.
    pub date: String,
    /// An optional note.
    #[serde(default)]
    pub note: Option<String>,
    /// The ID of the category, an empty string means no category.
    #[serde(default)]
    pub category_id: Option<String>,
}

impl Transaction {
    /// Validate a store record.
    ///
    /// Date-times without an offset, and plain dates, are read as local time
    /// in `timezone`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is negative, NaN or infinite,
    /// - or [Error::InvalidDate] if the date cannot be parsed.
    pub fn try_from_record(
        record: &TransactionRecord,
        timezone: &DisplayTimezone,
    ) -> Result<Self, Error> {
        let amount = Amount::from_f64(record.amount).ok_or_else(|| Error::InvalidAmount {
            id: record.id.clone(),
            amount: record.amount,
        })?;

        let occurred_at =
            parse_occurred_at(&record.date, timezone).ok_or_else(|| Error::InvalidDate {
                id: record.id.clone(),
                date: record.date.clone(),
            })?;

        let category_id = record
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(CategoryId::new);

        Ok(Transaction {
            id: TransactionId::new(&record.id),
            amount,
            kind: record.kind,
            occurred_at,
            note: record.note.clone(),
            category_id,
        })
    }
}

/// Validate every record, failing the whole batch on the first bad record.
///
/// # Errors
/// Returns the error from [Transaction::try_from_record] for the first
/// invalid record.
pub fn parse_transactions(
    records: &[TransactionRecord],
    timezone: &DisplayTimezone,
) -> Result<Vec<Transaction>, Error> {
    records
        .iter()
        .map(|record| {
            Transaction::try_from_record(record, timezone).inspect_err(|error| {
                tracing::warn!("Rejecting transaction batch: {error}");
            })
        })
        .collect()
}

fn parse_occurred_at(text: &str, timezone: &DisplayTimezone) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time);
    }

    let naive_format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    if let Ok(wall_clock) = PrimitiveDateTime::parse(text, naive_format) {
        return Some(timezone.assume_local(wall_clock));
    }

    let date_format = format_description!("[year]-[month]-[day]");
    Date::parse(text, date_format)
        .ok()
        .map(|date| timezone.assume_local(PrimitiveDateTime::new(date, Time::MIDNIGHT)))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::{datetime, offset};

    use crate::{
        Error,
        category::CategoryId,
        timezone::DisplayTimezone,
        transaction::{
            core::{Transaction, TransactionKind},
            record::{TransactionRecord, parse_transactions},
        },
    };

    fn record(id: &str, amount: f64, date: &str) -> TransactionRecord {
        TransactionRecord {
            id: id.to_owned(),
            amount,
            kind: TransactionKind::Expense,
            date: date.to_owned(),
            note: None,
            category_id: None,
        }
    }

    #[test]
    fn parses_rfc3339_date_time() {
        let got = Transaction::try_from_record(
            &record("1", 10.0, "2024-01-15T10:30:00.000Z"),
            &DisplayTimezone::default(),
        )
        .unwrap();

        assert_eq!(got.occurred_at, datetime!(2024-01-15 10:30 UTC));
        assert_eq!(got.amount.value(), dec!(10));
    }

    #[test]
    fn reads_naive_date_time_in_display_timezone() {
        let timezone = DisplayTimezone::Fixed(offset!(+7));

        let got =
            Transaction::try_from_record(&record("1", 10.0, "2024-01-01T00:15:00"), &timezone)
                .unwrap();

        assert_eq!(got.occurred_at, datetime!(2024-01-01 0:15 +7));
    }

    #[test]
    fn reads_naive_date_time_with_fraction() {
        let got = Transaction::try_from_record(
            &record("1", 10.0, "2024-05-06T07:08:09.123456"),
            &DisplayTimezone::default(),
        )
        .unwrap();

        assert_eq!(got.occurred_at.date(), time::macros::date!(2024 - 05 - 06));
    }

    #[test]
    fn reads_plain_date_as_local_midnight() {
        let timezone = DisplayTimezone::Fixed(offset!(-3));

        let got = Transaction::try_from_record(&record("1", 10.0, "2023-12-31"), &timezone)
            .unwrap();

        assert_eq!(got.occurred_at, datetime!(2023-12-31 0:00 -3));
    }

    #[test]
    fn rejects_unparseable_date() {
        let got = Transaction::try_from_record(
            &record("bad", 10.0, "31/12/2023"),
            &DisplayTimezone::default(),
        );

        assert_eq!(
            got,
            Err(Error::InvalidDate {
                id: "bad".to_owned(),
                date: "31/12/2023".to_owned()
            })
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let got = Transaction::try_from_record(
            &record("neg", -5.0, "2024-01-01"),
            &DisplayTimezone::default(),
        );

        assert_eq!(
            got,
            Err(Error::InvalidAmount {
                id: "neg".to_owned(),
                amount: -5.0
            })
        );
    }

    #[test]
    fn empty_category_id_means_no_category() {
        let mut blank = record("1", 1.0, "2024-01-01");
        blank.category_id = Some("  ".to_owned());
        let mut set = record("2", 1.0, "2024-01-01");
        set.category_id = Some("c1".to_owned());

        let got = parse_transactions(&[blank, set], &DisplayTimezone::default()).unwrap();

        assert_eq!(got[0].category_id, None);
        assert_eq!(got[1].category_id, Some(CategoryId::new("c1")));
    }

    #[test]
    fn one_bad_record_rejects_the_batch() {
        let records = [
            record("ok", 1.0, "2024-01-01"),
            record("bad", f64::NAN, "2024-01-01"),
        ];

        let got = parse_transactions(&records, &DisplayTimezone::default());

        assert!(matches!(got, Err(Error::InvalidAmount { ref id, .. }) if id == "bad"));
    }

    #[test]
    fn deserializes_store_json_with_mongo_id() {
        let json = r#"[
            {"_id": "65a1", "amount": 1000, "type": "income", "date": "2024-01-15T00:00:00Z", "category_id": "salary"},
            {"id": "65a2", "amount": 12.5, "type": "expense", "date": "2024-01-16", "note": "Lunch"}
        ]"#;

        let records: Vec<TransactionRecord> = serde_json::from_str(json).unwrap();
        let got = parse_transactions(&records, &DisplayTimezone::default()).unwrap();

        assert_eq!(got[0].id.as_ref(), "65a1");
        assert_eq!(got[0].kind, TransactionKind::Income);
        assert_eq!(got[1].note.as_deref(), Some("Lunch"));
        assert_eq!(got[1].amount.value(), dec!(12.5));
    }
}
