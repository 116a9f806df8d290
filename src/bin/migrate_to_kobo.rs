//! Convert the legacy decimal `amount` column to integer kobo.
//!
//! Run once, with no arguments, against a database that predates the kobo
//! representation. Exits 0 on success and 1 on failure; a failed run rolls
//! back completely and is re-run from scratch after inspecting the logs.

use env_logger::{Env, Target};

use kobo_ledger_backend::config::Config;
use kobo_ledger_backend::database::create_pool;
use kobo_ledger_backend::tasks::KoboBackfill;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    log::info!("Starting migration from naira.kobo to kobo...");

    let config = match Config::from_toml() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let backfill = KoboBackfill::new(pool.clone(), &config.migration);
    let result = backfill.run().await;

    // Release connections whether the run succeeded or not
    if let Err(e) = pool.close().await {
        log::warn!("Failed to close database connections: {e}");
    }

    match result {
        Ok(report) => {
            log::info!(
                "Migration completed successfully ({} rows converted)",
                report.rows_converted
            );
            log::info!("Run the schema migration to complete the process");
        }
        Err(e) => {
            log::error!("Migration failed: {e}");
            std::process::exit(1);
        }
    }
}
