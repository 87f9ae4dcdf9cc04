mod catalog;
pub mod client;
mod integrations;
pub mod routes;
pub mod types;

pub use catalog::{CATEGORY_PAGE_SIZE, CHEAPEST_LIMIT};
pub use client::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
