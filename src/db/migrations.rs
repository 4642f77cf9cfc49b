use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Ordered schema steps; `user_version` tracks how many have been applied.
const MIGRATIONS: &[&str] = &[include_str!("schemas/schema_v1.sql")];

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let applied: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;
    let applied = usize::try_from(applied).unwrap_or(0);

    if applied > MIGRATIONS.len() {
        bail!(
            "database schema version {} is newer than this build supports ({})",
            applied,
            MIGRATIONS.len()
        );
    }
    if applied == MIGRATIONS.len() {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    for (index, sql) in MIGRATIONS.iter().enumerate().skip(applied) {
        tx.execute_batch(sql)
            .with_context(|| format!("migration to schema version {} failed", index + 1))?;
    }

    tx.pragma_update(None, "user_version", MIGRATIONS.len() as i32)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")
}
