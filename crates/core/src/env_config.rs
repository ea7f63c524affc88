//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => parse_or_default(var, &v, default),
        Err(_) => default,
    }
}

/// Read a boolean flag. `true`/`1`/`yes` (any case) are truthy, everything else is not.
pub fn env_flag(var: &str) -> bool {
    std::env::var(var).is_ok_and(|v| is_truthy(&v))
}

fn parse_or_default<T: std::str::FromStr + std::fmt::Display>(var: &str, raw: &str, default: T) -> T {
    match raw.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(
                var,
                value = %raw,
                default = %default,
                "invalid env var value, using default"
            );
            default
        },
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
