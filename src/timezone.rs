//! The timezone that calendar fields (year, month) are read in.
//!
//! Every report derives calendar fields from the same [DisplayTimezone] so that
//! a transaction made late on the 31st of December lands in the year the user
//! sees when the date is rendered.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// A timezone used for reading calendar fields.
#[derive(Clone, Copy)]
pub enum DisplayTimezone {
    /// A fixed UTC offset.
    Fixed(UtcOffset),
    /// A canonical IANA timezone, e.g. "Pacific/Auckland".
    Named(&'static Tz),
}

impl DisplayTimezone {
    /// Look up a timezone by its canonical name.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the name is not a known canonical timezone.
    pub fn from_name(canonical_timezone: &str) -> Result<Self, Error> {
        if canonical_timezone.eq_ignore_ascii_case("UTC") {
            return Ok(Self::Fixed(UtcOffset::UTC));
        }

        time_tz::timezones::get_by_name(canonical_timezone)
            .map(Self::Named)
            .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))
    }

    /// The UTC offset in effect at `instant`.
    pub fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        match self {
            Self::Fixed(offset) => *offset,
            Self::Named(tz) => tz.get_offset_utc(&instant).to_utc(),
        }
    }

    /// Convert `instant` to local time in this timezone.
    pub fn to_local(&self, instant: OffsetDateTime) -> OffsetDateTime {
        instant.to_offset(self.offset_at(instant))
    }

    /// Interpret a wall-clock date-time as local time in this timezone.
    ///
    /// The offset is taken at the wall-clock time read as UTC, which only
    /// differs from the exact answer within the hours around a DST change.
    pub fn assume_local(&self, wall_clock: PrimitiveDateTime) -> OffsetDateTime {
        let offset = self.offset_at(wall_clock.assume_utc());
        wall_clock.assume_offset(offset)
    }
}

impl std::fmt::Debug for DisplayTimezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(offset) => f.debug_tuple("Fixed").field(offset).finish(),
            Self::Named(tz) => f.debug_tuple("Named").field(&tz.name()).finish(),
        }
    }
}

impl Default for DisplayTimezone {
    fn default() -> Self {
        Self::Fixed(UtcOffset::UTC)
    }
}
