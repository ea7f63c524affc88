//! Migration v1: gauges and their observations

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS gauges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    description TEXT,
    unit TEXT NOT NULL CHECK (length(trim(unit)) > 0),
    icon TEXT NOT NULL DEFAULT 'chart-bar' CHECK (length(trim(icon)) > 0),
    target REAL NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS gauge_values (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    gauge_id INTEGER NOT NULL REFERENCES gauges(id) ON DELETE CASCADE,
    value REAL NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_gauge_values_gauge_recorded
    ON gauge_values (gauge_id, recorded_at);
";
