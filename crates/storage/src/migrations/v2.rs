//! Migration v2: per-school payroll portal registry

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS salary_sources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    school_id INTEGER NOT NULL REFERENCES schools(id),
    source_type TEXT NOT NULL,
    base_url TEXT NOT NULL,
    query_params TEXT,
    parser_name TEXT NOT NULL,
    last_scraped TEXT,
    active BOOLEAN DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_salary_sources_school ON salary_sources(school_id);
CREATE INDEX IF NOT EXISTS idx_salary_sources_active ON salary_sources(active);
";
