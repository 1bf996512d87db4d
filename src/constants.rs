/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "https://stable.example.com/organization/v1/d/";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;

// Persistent store
pub const STORE_FILE_NAME: &str = "state.toml";
pub const TOKEN_KEY: &str = "token";
pub const THEME_KEY: &str = "theme";
pub const THEME_DARK: &str = "dark";
pub const THEME_LIGHT: &str = "light";

// Catalog view
pub const HORSES_PER_PAGE: usize = 8;
pub const PASSWORD_MIN_LEN: usize = 6;

// Notifications
pub const NOTICE_TTL_MILLIS: i64 = 1500;

// Event loop
pub const EVENT_POLL_MILLIS: u64 = 50;
pub const COMPLETION_CHANNEL_CAPACITY: usize = 100;
