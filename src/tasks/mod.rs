//! Operator-triggered maintenance jobs.
//!
//! Nothing here runs as part of the HTTP server; each job is invoked from
//! its own binary and exits when done.

pub mod kobo_backfill;

pub use kobo_backfill::{BackfillReport, KoboBackfill};
