pub mod chart;
pub mod format;
pub mod image_cache;
pub mod pagination;
pub mod query;
#[cfg(target_arch = "wasm32")]
pub mod storage;
