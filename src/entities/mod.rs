pub mod transactions;

pub use transactions as transaction_entity;
