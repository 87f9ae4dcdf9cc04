pub mod query;
pub mod toast;
