#[cfg(target_arch = "wasm32")]
fn main() {
    use catalog_dashboard_frontend::{boot, router};

    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("Logger already initialised: {}", err).into());
    }
    log::info!("Starting Fake Store dashboard: loading runtime config");

    wasm_bindgen_futures::spawn_local(boot(router::mount_app));
}

// Host builds exist for tests only.
#[cfg(not(target_arch = "wasm32"))]
fn main() {}
