use crate::{Error, pagination::PaginationConfig, timezone::DisplayTimezone};

/// Settings shared by every report: where calendar fields are read, how lists
/// are paged and how money is shown.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// The timezone that years and months are read in.
    pub timezone: DisplayTimezone,
    /// Page defaults for transaction lists.
    pub pagination: PaginationConfig,
    /// The symbol put in front of formatted amounts.
    pub currency_symbol: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: DisplayTimezone::default(),
            pagination: PaginationConfig::default(),
            currency_symbol: "฿".to_owned(),
        }
    }
}

impl ReportConfig {
    /// Create a config that reads dates in the canonical timezone `timezone`,
    /// e.g. "Asia/Bangkok".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `timezone` is not a known canonical timezone.
    pub fn new(timezone: &str) -> Result<Self, Error> {
        Ok(Self {
            timezone: DisplayTimezone::from_name(timezone)?,
            ..Default::default()
        })
    }

    /// Set the default page size for transaction lists.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.pagination.default_page_size = page_size;
        self
    }

    /// Set the currency symbol.
    pub fn currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_owned();
        self
    }
}
