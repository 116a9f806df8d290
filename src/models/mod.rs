pub mod common;
pub mod transaction;

pub use common::*;
pub use transaction::*;
