pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Resolves the runtime config, then mounts. Components read config
/// synchronously, so nothing may render before this resolves.
pub async fn boot(mount: impl FnOnce()) {
    config::init().await;
    mount();
}
