//! One-shot conversion of the legacy decimal `amount` column to integer
//! kobo, run by the `migrate-to-kobo` binary.
//!
//! The whole sequence (add column, back-fill, verify) executes inside a
//! single transaction: either every row ends up converted and verified, or
//! no schema or data change persists. Dropping or renaming the legacy
//! column afterwards is a separate operator step.

use crate::config::MigrationConfig;
use crate::error::{AppError, AppResult};
use crate::utils::naira_to_kobo;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, Statement, TransactionTrait,
};
use std::time::Duration;
use tokio::time::timeout;

pub struct KoboBackfill {
    pool: DatabaseConnection,
    max_wait: Duration,
    max_duration: Duration,
}

#[derive(Debug)]
pub struct BackfillReport {
    pub rows_converted: usize,
}

impl KoboBackfill {
    pub fn new(pool: DatabaseConnection, config: &MigrationConfig) -> Self {
        Self {
            pool,
            max_wait: Duration::from_secs(config.max_wait_secs),
            max_duration: Duration::from_secs(config.max_duration_secs),
        }
    }

    /// Run the back-fill. Waiting for a connection is bounded by
    /// `max_wait`; the transaction body is bounded by `max_duration`.
    /// Exceeding either bound rolls everything back.
    pub async fn run(&self) -> AppResult<BackfillReport> {
        let txn = timeout(self.max_wait, self.pool.begin()).await.map_err(|_| {
            AppError::MigrationError(format!(
                "timed out after {}s waiting for a database connection",
                self.max_wait.as_secs()
            ))
        })??;

        match timeout(self.max_duration, Self::backfill(&txn)).await {
            Ok(Ok(report)) => {
                txn.commit().await?;
                Ok(report)
            }
            Ok(Err(e)) => {
                txn.rollback().await?;
                Err(e)
            }
            Err(_) => {
                txn.rollback().await?;
                Err(AppError::MigrationError(format!(
                    "aborted after exceeding the {}s time limit",
                    self.max_duration.as_secs()
                )))
            }
        }
    }

    async fn backfill(txn: &DatabaseTransaction) -> AppResult<BackfillReport> {
        let backend = txn.get_database_backend();

        txn.execute_unprepared(
            "ALTER TABLE transactions ADD COLUMN IF NOT EXISTS amount_kobo BIGINT",
        )
        .await?;
        log::info!("Added amount_kobo column");

        // Inserts racing the back-fill would be missing from the snapshot
        // below, so block writers until commit.
        txn.execute_unprepared("LOCK TABLE transactions IN EXCLUSIVE MODE")
            .await?;

        let rows = txn
            .query_all(Statement::from_string(
                backend,
                "SELECT id, amount::TEXT AS amount FROM transactions ORDER BY id".to_string(),
            ))
            .await?;
        log::info!("Found {} transactions to migrate", rows.len());

        for row in &rows {
            let id: i64 = row.try_get("", "id")?;
            let amount: String = row.try_get("", "amount")?;
            let kobo = convert_legacy_amount(&amount)?;

            txn.execute(Statement::from_sql_and_values(
                backend,
                "UPDATE transactions SET amount_kobo = $1 WHERE id = $2",
                [kobo.into(), id.into()],
            ))
            .await?;

            log::info!("Migrated transaction {id}: ₦{amount} -> {kobo} kobo");
        }

        // Any row still unset after the loop fails the whole run
        let unset = txn
            .query_one(Statement::from_string(
                backend,
                "SELECT COUNT(*) AS count FROM transactions WHERE amount_kobo IS NULL".to_string(),
            ))
            .await?
            .ok_or_else(|| {
                AppError::MigrationError("verification query returned no row".to_string())
            })?;
        let count: i64 = unset.try_get("", "count")?;
        if count > 0 {
            return Err(AppError::MigrationError(format!(
                "{count} records failed to migrate"
            )));
        }

        log::info!("All {} records successfully migrated to kobo", rows.len());
        Ok(BackfillReport {
            rows_converted: rows.len(),
        })
    }
}

/// Parse a legacy decimal amount (as text) and convert it to kobo.
fn convert_legacy_amount(amount: &str) -> AppResult<i64> {
    let naira: f64 = amount.trim().parse().map_err(|_| {
        AppError::MigrationError(format!("legacy amount {amount:?} is not a number"))
    })?;
    if !naira.is_finite() {
        return Err(AppError::MigrationError(format!(
            "legacy amount {amount:?} is not a finite number"
        )));
    }
    Ok(naira_to_kobo(naira))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_legacy_amount() {
        assert_eq!(convert_legacy_amount("19.99").unwrap(), 1999);
        assert_eq!(convert_legacy_amount("10").unwrap(), 1000);
        assert_eq!(convert_legacy_amount("0.00").unwrap(), 0);
        assert_eq!(convert_legacy_amount(" 2.50 ").unwrap(), 250);
    }

    #[test]
    fn test_convert_legacy_amount_rejects_garbage() {
        assert!(convert_legacy_amount("lunch").is_err());
        assert!(convert_legacy_amount("").is_err());
        assert!(convert_legacy_amount("NaN").is_err());
        assert!(convert_legacy_amount("inf").is_err());
    }

    #[test]
    fn test_convert_legacy_amount_rounds_to_nearest_kobo() {
        assert_eq!(convert_legacy_amount("19.994").unwrap(), 1999);
        assert_eq!(convert_legacy_amount("19.996").unwrap(), 2000);
    }
}
