//! Calendar client configuration.

use std::time::Duration;

use crate::error::{CalendarError, CalendarResult};

/// Default target calendar.
const DEFAULT_CALENDAR_ID: &str = "primary";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the calendar boundary.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// The calendar events are exported to. Defaults to `"primary"`.
    pub calendar_id: String,
    /// Timeout applied to every remote call.
    pub timeout: Duration,
    /// Override for the API base URL (staging endpoints, local test servers).
    pub api_base: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
            api_base: None,
        }
    }
}

impl CalendarConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target calendar id.
    #[must_use]
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CalendarResult<()> {
        if self.calendar_id.is_empty() {
            return Err(CalendarError::configuration("calendar_id is required"));
        }
        if self.timeout.is_zero() {
            return Err(CalendarError::configuration("timeout must be non-zero"));
        }
        Ok(())
    }
}
