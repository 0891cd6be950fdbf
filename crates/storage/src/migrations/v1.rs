//! Migration v1: conferences, schools, per-season coach rows, salaries

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS conferences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    abbrev TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    division TEXT NOT NULL DEFAULT 'FBS'
);

CREATE TABLE IF NOT EXISTS schools (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    conference_id INTEGER REFERENCES conferences(id)
);

CREATE TABLE IF NOT EXISTS coaches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    school_id INTEGER REFERENCES schools(id),
    position TEXT,
    is_head_coach INTEGER NOT NULL DEFAULT 0,
    year INTEGER
);

CREATE TABLE IF NOT EXISTS salaries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    coach_id INTEGER NOT NULL REFERENCES coaches(id),
    year INTEGER NOT NULL,
    total_pay INTEGER,
    school_pay INTEGER,
    max_bonus INTEGER,
    bonuses_paid INTEGER,
    buyout INTEGER,
    source TEXT NOT NULL,
    source_date TEXT
);

CREATE TABLE IF NOT EXISTS coaching_trees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    coach_name TEXT NOT NULL,
    mentor_name TEXT NOT NULL,
    school_id INTEGER REFERENCES schools(id),
    start_year INTEGER,
    end_year INTEGER,
    role TEXT
);

CREATE INDEX IF NOT EXISTS idx_coaches_school_year ON coaches(school_id, year);
CREATE INDEX IF NOT EXISTS idx_coaches_year ON coaches(year);
CREATE INDEX IF NOT EXISTS idx_coaches_name ON coaches(name);
CREATE INDEX IF NOT EXISTS idx_salaries_coach_year ON salaries(coach_id, year);
";
