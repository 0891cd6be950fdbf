//! Migration v3: staff update audit log and roster scrape timestamps

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS staff_updates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    school TEXT NOT NULL,
    name TEXT NOT NULL,
    role TEXT,
    conference TEXT,
    source_url TEXT,
    effective_date TEXT,
    year INTEGER NOT NULL,
    coach_id INTEGER REFERENCES coaches(id),
    outcome TEXT NOT NULL,
    received_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_staff_updates_received ON staff_updates(received_at);
";

pub(super) const SCRAPED_AT_COLUMN: &str = "source_scraped_at";
pub(super) const SCRAPED_AT_DEF: &str = "TEXT";
