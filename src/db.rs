// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("app.centavo", "Centavo", "centavo"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("centavo.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &std::path::Path) -> Result<Connection> {
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// In-memory database with the full schema; used by tests.
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('checking','savings','credit_card','cash','investment')),
        balance TEXT NOT NULL DEFAULT '0',
        baseline_balance TEXT NOT NULL DEFAULT '0',
        currency TEXT NOT NULL,
        credit_limit TEXT,
        statement_balance TEXT NOT NULL DEFAULT '0',
        closing_day INTEGER,
        due_day INTEGER,
        is_active INTEGER NOT NULL DEFAULT 1,
        include_in_total INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        deleted_at TEXT,
        UNIQUE(user_id, name)
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        color TEXT,
        icon TEXT,
        UNIQUE(user_id, name)
    );

    CREATE TABLE IF NOT EXISTS debts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('loan','credit_card')),
        account_id INTEGER,
        total_amount TEXT NOT NULL,
        remaining_amount TEXT NOT NULL,
        monthly_payment TEXT,
        start_date TEXT NOT NULL,
        end_date TEXT,
        due_day INTEGER,
        total_installments INTEGER,
        closed_at TEXT,
        notes TEXT,
        deleted_at TEXT,
        FOREIGN KEY(account_id) REFERENCES accounts(id)
    );
    CREATE INDEX IF NOT EXISTS idx_debts_account ON debts(account_id);

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        account_id INTEGER NOT NULL,
        category_id INTEGER,
        transfer_to_account_id INTEGER,
        debt_id INTEGER,
        type TEXT NOT NULL CHECK(type IN ('income','expense','transfer')),
        amount TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        notes TEXT,
        date TEXT NOT NULL,
        time TEXT,
        is_confirmed INTEGER NOT NULL DEFAULT 1,
        is_recurring INTEGER NOT NULL DEFAULT 0,
        recurring_frequency TEXT,
        recurring_end_date TEXT,
        reference TEXT,
        tags TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        deleted_at TEXT,
        FOREIGN KEY(account_id) REFERENCES accounts(id),
        FOREIGN KEY(transfer_to_account_id) REFERENCES accounts(id),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL,
        FOREIGN KEY(debt_id) REFERENCES debts(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);
    CREATE INDEX IF NOT EXISTS idx_transactions_debt ON transactions(debt_id);

    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        category_id INTEGER NOT NULL,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        amount TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        threshold_percentage INTEGER NOT NULL DEFAULT 80,
        deleted_at TEXT,
        UNIQUE(user_id, category_id, year, month),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS fixed_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        category_id INTEGER,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        day_of_month INTEGER NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        deleted_at TEXT,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    "#,
    )
    .context("Initialize schema")?;
    Ok(())
}
