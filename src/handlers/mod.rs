pub mod health;
pub mod transaction;

pub use health::health_config;
pub use transaction::transaction_config;
