mod repository;
mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

pub(crate) use repository::DebtRepository;

const SETTING_EXTRA_PAYMENT: &str = "extra_payment";
const SETTING_STRATEGY: &str = "strategy";

const DEBT_COLUMNS: &str =
    "id, name, kind, balance, minimum_payment, interest_rate, created_at";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "schema created");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Debts ─────────────────────────────────────────────────

    fn row_to_debt(row: &Row<'_>) -> rusqlite::Result<Debt> {
        let balance: String = row.get(3)?;
        let minimum: String = row.get(4)?;
        let rate: String = row.get(5)?;
        Ok(Debt {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: DebtKind::parse(&row.get::<_, String>(2)?),
            balance: Decimal::from_str(&balance).unwrap_or_default(),
            minimum_payment: Decimal::from_str(&minimum).unwrap_or_default(),
            interest_rate: Decimal::from_str(&rate).unwrap_or_default(),
            created_at: row.get(6)?,
        })
    }

    pub(crate) fn find_debt_by_name(&self, name: &str) -> Result<Option<Debt>> {
        let sql = format!("SELECT {DEBT_COLUMNS} FROM debts WHERE lower(name) = lower(?1) LIMIT 1");
        Ok(self
            .conn
            .query_row(&sql, params![name], Self::row_to_debt)
            .optional()?)
    }

    /// Insert new debts and refresh existing ones (matched by name) in one
    /// transaction. Returns (created, updated).
    pub(crate) fn upsert_debts_batch(&mut self, debts: &[Debt]) -> Result<(usize, usize)> {
        let mut created = 0;
        let mut updated = 0;
        let mut pending = Vec::new();
        for debt in debts {
            match self.find_debt_by_name(&debt.name)? {
                Some(existing) => pending.push(Debt {
                    id: existing.id,
                    created_at: existing.created_at,
                    ..debt.clone()
                }),
                None => pending.push(debt.clone()),
            }
        }

        let tx = self.conn.transaction()?;
        for debt in &pending {
            if debt.id.is_empty() {
                let id = unique_id(&tx, &debt.name)?;
                insert_debt(&tx, &id, debt)?;
                created += 1;
            } else {
                tx.execute(
                    "UPDATE debts SET kind = ?1, balance = ?2, minimum_payment = ?3, interest_rate = ?4
                     WHERE id = ?5",
                    params![
                        debt.kind.as_str(),
                        debt.balance.to_string(),
                        debt.minimum_payment.to_string(),
                        debt.interest_rate.to_string(),
                        debt.id,
                    ],
                )?;
                updated += 1;
            }
        }
        tx.commit()?;
        tracing::info!(created, updated, "debts imported");
        Ok((created, updated))
    }

    /// (total balance, total minimum payments) across all debts.
    pub(crate) fn debt_totals(&self) -> Result<(Decimal, Decimal)> {
        let debts = self.list_debts()?;
        Ok(debts.iter().fold((Decimal::ZERO, Decimal::ZERO), |acc, d| {
            (acc.0 + d.balance, acc.1 + d.minimum_payment)
        }))
    }

    // ── Settings ──────────────────────────────────────────────

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        tracing::debug!(key, value, "setting saved");
        Ok(())
    }

    pub(crate) fn get_extra_payment(&self) -> Result<Decimal> {
        Ok(self
            .get_setting(SETTING_EXTRA_PAYMENT)?
            .and_then(|v| Decimal::from_str(&v).ok())
            .unwrap_or_default())
    }

    pub(crate) fn set_extra_payment(&self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            anyhow::bail!("Extra payment cannot be negative: {amount}");
        }
        self.set_setting(SETTING_EXTRA_PAYMENT, &amount.to_string())
    }

    pub(crate) fn get_strategy(&self) -> Result<Strategy> {
        Ok(self
            .get_setting(SETTING_STRATEGY)?
            .and_then(|v| Strategy::parse(&v))
            .unwrap_or_default())
    }

    pub(crate) fn set_strategy(&self, strategy: Strategy) -> Result<()> {
        self.set_setting(SETTING_STRATEGY, strategy.as_str())
    }
}

fn id_exists(conn: &Connection, id: &str) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM debts WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?)
}

/// Slug of `name`, suffixed `-2`, `-3`, ... until it is free.
fn unique_id(conn: &Connection, name: &str) -> Result<String> {
    let base = slugify(name);
    if !id_exists(conn, &base)? {
        return Ok(base);
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !id_exists(conn, &candidate)? {
            return Ok(candidate);
        }
        n += 1;
    }
}

fn insert_debt(conn: &Connection, id: &str, debt: &Debt) -> Result<()> {
    conn.execute(
        "INSERT INTO debts (id, name, kind, balance, minimum_payment, interest_rate, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            debt.name,
            debt.kind.as_str(),
            debt.balance.to_string(),
            debt.minimum_payment.to_string(),
            debt.interest_rate.to_string(),
            debt.created_at,
        ],
    )?;
    Ok(())
}

impl DebtRepository for Database {
    fn list_debts(&self) -> Result<Vec<Debt>> {
        let sql = format!("SELECT {DEBT_COLUMNS} FROM debts ORDER BY created_at, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_debt)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn get_debt(&self, id: &str) -> Result<Option<Debt>> {
        let sql = format!("SELECT {DEBT_COLUMNS} FROM debts WHERE id = ?1");
        Ok(self
            .conn
            .query_row(&sql, params![id], Self::row_to_debt)
            .optional()?)
    }

    fn create_debt(&mut self, debt: &Debt) -> Result<String> {
        debt.validate()?;
        let id = unique_id(&self.conn, &debt.name)?;
        insert_debt(&self.conn, &id, debt)
            .with_context(|| format!("Failed to save debt '{}'", debt.name))?;
        tracing::info!(id = %id, balance = %debt.balance, "debt created");
        Ok(id)
    }

    fn update_debt(&mut self, debt: &Debt) -> Result<bool> {
        debt.validate()?;
        let changed = self.conn.execute(
            "UPDATE debts SET name = ?1, kind = ?2, balance = ?3, minimum_payment = ?4, interest_rate = ?5
             WHERE id = ?6",
            params![
                debt.name,
                debt.kind.as_str(),
                debt.balance.to_string(),
                debt.minimum_payment.to_string(),
                debt.interest_rate.to_string(),
                debt.id,
            ],
        )?;
        tracing::debug!(id = %debt.id, changed, "debt updated");
        Ok(changed > 0)
    }

    fn delete_debt(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM debts WHERE id = ?1", params![id])?;
        tracing::info!(id, changed, "debt deleted");
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests;
