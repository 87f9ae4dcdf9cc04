use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::layout::Layout,
    pages::{
        categories::CategoriesPage, home::HomePage, product_detail::ProductDetailPage,
        products::ProductsPage, stats::StatsPage, sync::SyncPage,
    },
    state::{query::QueryClient, toast::ToastState},
};

pub mod paths {
    pub const HOME: &str = "/home";
    pub const PRODUCTS: &str = "/products";
    pub const PRODUCT_DETAIL: &str = "/products/:id";
    pub const CATEGORIES: &str = "/categories";
    pub const STATS: &str = "/stats";
    pub const SYNC: &str = "/sync";

    pub fn product_detail(id: i64) -> String {
        format!("{}/{}", PRODUCTS, id)
    }
}

pub const ROUTE_PATHS: &[&str] = &[
    paths::HOME,
    paths::PRODUCTS,
    paths::PRODUCT_DETAIL,
    paths::CATEGORIES,
    paths::STATS,
    paths::SYNC,
];

pub fn mount_app() {
    mount_to_body(app_root);
}

/// Shared services every page pulls from context.
pub fn provide_app_context() -> ToastState {
    let toasts = ToastState::new();
    provide_context(toasts.clone());
    provide_context(ApiClient::new().with_error_reporter(toasts.error_reporter()));
    provide_context(QueryClient::new());
    toasts
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_app_context();
    view! {
        <Title text="Fake Store Integration"/>
        <Router>
            <Routes>
                <Route path="" view=AppShell>
                    <Route path="" view=RedirectHome/>
                    <Route path=paths::HOME view=HomePage/>
                    <Route path=paths::PRODUCTS view=ProductsPage/>
                    <Route path=paths::PRODUCT_DETAIL view=ProductDetailPage/>
                    <Route path=paths::CATEGORIES view=CategoriesPage/>
                    <Route path=paths::STATS view=StatsPage/>
                    <Route path=paths::SYNC view=SyncPage/>
                    <Route path="/*any" view=RedirectHome/>
                </Route>
            </Routes>
        </Router>
    }
}

#[component]
fn AppShell() -> impl IntoView {
    let location = use_location();
    view! {
        <Layout current_path=location.pathname>
            <Outlet/>
        </Layout>
    }
}

#[component]
fn RedirectHome() -> impl IntoView {
    view! { <Redirect path=paths::HOME/> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn route_paths_cover_every_section() {
        for path in ["/home", "/products", "/products/:id", "/categories", "/stats", "/sync"] {
            assert!(ROUTE_PATHS.contains(&path), "missing route: {}", path);
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn product_detail_path_embeds_id() {
        assert_eq!(paths::product_detail(42), "/products/42");
    }
}
