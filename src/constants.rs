//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the quiz generation service
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Deadline applied to every call against the quiz service
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Host fragment an article URL must contain
pub const REFERENCE_DOMAIN: &str = "wikipedia.org";

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log file written next to the config file
pub const LOG_FILE_NAME: &str = "wikiquiz.log";

/// Directory (under the home dir) holding config and logs
pub const CONFIG_DIR_NAME: &str = ".wikiquiz";

/// Placeholder shown in the URL input
pub const URL_PLACEHOLDER: &str = "https://en.wikipedia.org/wiki/Alan_Turing";

/// Application name
pub const APP_NAME: &str = "WikiQuiz";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
