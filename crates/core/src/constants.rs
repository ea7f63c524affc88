//! Shared constants for health-gauge.

/// Default listen address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "health-monitor.db";

/// SQLite connection pool: maximum connections.
pub const SQLITE_POOL_MAX_CONNECTIONS: u32 = 4;

/// SQLite busy timeout in seconds. Writers wait this long for the lock.
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

/// Step used for units containing "step".
pub const STEP_COUNT_INCREMENT: f64 = 1000.0;

/// Step used for liter/litre units.
pub const LITER_INCREMENT: f64 = 0.1;

/// Step used for hour units.
pub const HOUR_INCREMENT: f64 = 0.5;

/// Step used when no other rule matches.
pub const DEFAULT_INCREMENT: f64 = 1.0;

/// Icon pre-filled on the new-gauge form and used as the column default.
pub const DEFAULT_ICON: &str = "chart-bar";
