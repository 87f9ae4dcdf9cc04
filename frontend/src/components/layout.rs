use chrono::Datelike;
use leptos::*;

use crate::{components::toast::ToastHost, config, router::paths, state::toast::use_toasts};

pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { href: paths::HOME, label: "Home", icon: "⌂" },
    NavItem { href: paths::PRODUCTS, label: "Produtos", icon: "▦" },
    NavItem { href: paths::CATEGORIES, label: "Categorias", icon: "☰" },
    NavItem { href: paths::STATS, label: "Dashboard", icon: "◔" },
    NavItem { href: paths::SYNC, label: "Sincronização", icon: "⟳" },
];

/// `/products/7` keeps "Produtos" highlighted.
pub fn is_active(item_href: &str, current_path: &str) -> bool {
    current_path == item_href
        || current_path
            .strip_prefix(item_href)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn Sidebar(
    #[prop(into)] current_path: Signal<String>,
    open: RwSignal<bool>,
) -> impl IntoView {
    let version = config::app_version();
    view! {
        <Show when=move || open.get()>
            <button
                type="button"
                aria-label="Fechar menu"
                class="fixed inset-0 z-30 bg-overlay-backdrop md:hidden"
                on:click=move |_| open.set(false)
            ></button>
        </Show>
        <aside class=move || {
            format!(
                "fixed inset-y-0 left-0 z-40 w-64 transform bg-surface-elevated border-r border-border transition-transform duration-200 md:translate-x-0 md:static {}",
                if open.get() { "translate-x-0" } else { "-translate-x-full" }
            )
        }>
            <div class="flex items-center gap-2 h-16 px-6 border-b border-border">
                <span class="text-xl font-bold text-action-primary-bg">"Fake Store"</span>
            </div>
            <nav class="px-3 py-4 space-y-1">
                {NAV_ITEMS
                    .iter()
                    .map(|item| {
                        let item = *item;
                        let class = move || {
                            if is_active(item.href, &current_path.get()) {
                                "flex items-center gap-3 rounded-md px-3 py-2 text-sm font-medium bg-action-primary-bg text-action-primary-text"
                            } else {
                                "flex items-center gap-3 rounded-md px-3 py-2 text-sm font-medium text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            }
                        };
                        view! {
                            <a
                                href=item.href
                                class=class
                                aria-current=move || is_active(item.href, &current_path.get()).then_some("page")
                                on:click=move |_| open.set(false)
                            >
                                <span aria-hidden="true">{item.icon}</span>
                                <span>{item.label}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="absolute bottom-0 w-full px-6 py-3 text-xs text-fg-muted border-t border-border">
                {format!("Versão {}", version)}
            </div>
        </aside>
    }
}

#[component]
pub fn Topbar(on_toggle: Callback<()>, client_id: Option<String>) -> impl IntoView {
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="flex items-center justify-between h-16 px-4 sm:px-6">
                <div class="flex items-center gap-3">
                    <button
                        type="button"
                        class="md:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                        aria-label="Abrir menu"
                        on:click=move |_| on_toggle.call(())
                    >
                        <svg class="h-6 w-6" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"/>
                        </svg>
                    </button>
                    <h1 class="text-xl font-semibold text-fg">"Integração Fake Store"</h1>
                </div>
                {client_id.map(|id| view! {
                    <span class="hidden sm:inline text-xs text-fg-muted">{format!("Client ID: {}", id)}</span>
                })}
            </div>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().year();
    let version = config::app_version();
    view! {
        <footer class="border-t border-border px-6 py-4 text-xs text-fg-muted flex justify-between">
            <span>{format!("© {} Integração Fake Store", year)}</span>
            <span>{format!("v{}", version)}</span>
        </footer>
    }
}

#[cfg(target_arch = "wasm32")]
fn close_sidebar_on_wide_window(open: RwSignal<bool>) {
    let handle = window_event_listener(ev::resize, move |_| {
        let width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        if width >= MOBILE_BREAKPOINT_PX && open.get_untracked() {
            open.set(false);
        }
    });
    on_cleanup(move || handle.remove());
}

#[component]
pub fn Layout(#[prop(into)] current_path: Signal<String>, children: Children) -> impl IntoView {
    let sidebar_open = create_rw_signal(false);
    let toasts = use_toasts();
    #[cfg(target_arch = "wasm32")]
    close_sidebar_on_wide_window(sidebar_open);
    let on_toggle = Callback::new(move |_| sidebar_open.update(|open| *open = !*open));

    view! {
        <div class="min-h-screen flex bg-surface">
            <Sidebar current_path=current_path open=sidebar_open/>
            <div class="flex-1 flex flex-col min-w-0">
                <Topbar on_toggle=on_toggle client_id=config::client_id()/>
                <main class="flex-1 p-4 sm:p-6 lg:p-8">{children()}</main>
                <Footer/>
            </div>
            <ToastHost state=toasts/>
        </div>
    }
}

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col justify-center items-center gap-3 p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
            {label.map(|label| view! { <p class="text-sm text-fg-muted">{label}</p> })}
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_match_covers_nested_paths_only() {
        assert!(is_active("/products", "/products"));
        assert!(is_active("/products", "/products/12"));
        assert!(!is_active("/products", "/productsx"));
        assert!(!is_active("/home", "/stats"));
    }

    #[test]
    fn nav_lists_five_sections() {
        let labels: Vec<&str> = NAV_ITEMS.iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec!["Home", "Produtos", "Categorias", "Dashboard", "Sincronização"]
        );
    }
}
