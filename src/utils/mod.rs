pub mod currency;

pub use currency::{kobo_to_naira, naira_to_kobo};
