use super::view_model::{use_products_view_model, ProductsViewModel};
use crate::{
    api::DEFAULT_PER_PAGE,
    components::{
        common::{Button, ButtonVariant},
        error::InlineErrorMessage,
        filters_modal::ProductFiltersModal,
        layout::LoadingSpinner,
        products_table::ProductsTable,
    },
};
use leptos::*;
use leptos_router::{use_location, use_navigate, NavigateOptions};

/// Filter changes rewrite the current history entry.
fn filter_navigation() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let location = use_location();
    let navigate = use_navigate();
    let search = Signal::derive(move || location.search.get());
    let on_navigate = Callback::new(move |href: String| navigate(&href, filter_navigation()));
    view! { <ProductsPanel search=search on_navigate=on_navigate/> }
}

#[component]
pub fn ProductsPanel(search: Signal<String>, on_navigate: Callback<String>) -> impl IntoView {
    let vm = use_products_view_model(search, on_navigate);
    view! {
        <div class="space-y-6">
            <ProductsHeader vm=vm/>
            <ProductFiltersModal
                is_open=vm.show_filters.into()
                on_close=Callback::new(move |_| vm.show_filters.set(false))
                filters=vm.filters
                on_apply=Callback::new(move |filters| vm.apply_filters(filters))
                categories=vm.available_categories()
                loading=Signal::derive(move || vm.products_resource.loading().get())
            />
            <ProductsBody vm=vm/>
        </div>
    }
}

#[component]
fn ProductsHeader(vm: ProductsViewModel) -> impl IntoView {
    let page = vm.page();
    view! {
        <div class="flex items-center justify-between">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Catálogo de Produtos"</h1>
                {move || page.get().map(|p| view! {
                    <p class="text-sm text-fg-muted">{format!("{} produtos encontrados", p.total)}</p>
                })}
            </div>
            <Button variant=ButtonVariant::SecondaryOutlined on:click=move |_| vm.show_filters.set(true)>
                "Filtros" <span aria-hidden="true">"⚲"</span>
            </Button>
        </div>
    }
}

#[component]
fn ProductsBody(vm: ProductsViewModel) -> impl IntoView {
    let page = vm.page();
    let error = vm.error();
    let products = Signal::derive(move || page.get().map(|p| p.data).unwrap_or_default());
    let total = Signal::derive(move || page.get().map(|p| p.total).unwrap_or_default());
    let current_page = Signal::derive(move || page.get().map(|p| p.current_page).unwrap_or(1));
    let per_page = Signal::derive(move || {
        page.get()
            .map(|p| p.per_page)
            .unwrap_or(DEFAULT_PER_PAGE)
    });
    let filters = vm.filters;

    move || {
        if error.get().is_some() {
            return view! {
                <div class="bg-surface-elevated shadow rounded-lg p-6 text-center">
                    <p class="text-4xl text-status-error-text mb-3" aria-hidden="true">"⚠"</p>
                    <h3 class="text-lg font-semibold text-fg">"Erro ao carregar produtos"</h3>
                    <p class="text-fg-muted">"Verifique sua conexão e tente novamente."</p>
                    <InlineErrorMessage error=error/>
                </div>
            }
            .into_view();
        }
        if page.get().is_none() {
            return view! {
                <div class="bg-surface-elevated shadow rounded-lg">
                    <LoadingSpinner label="Carregando produtos..."/>
                </div>
            }
            .into_view();
        }
        view! {
            <ProductsTable
                products=products
                loading=Signal::derive(move || vm.products_resource.loading().get())
                total_records=total
                current_page=current_page
                rows_per_page=per_page
                on_page_change=Callback::new(move |(page, per_page)| vm.change_page(page, per_page))
                on_sort=Callback::new(move |(field, order)| vm.change_sort(field, order))
                sort_field=Signal::derive(move || filters.get().sort)
                sort_order=Signal::derive(move || filters.get().order)
            />
        }
        .into_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_changes_replace_history_entry() {
        let options = filter_navigation();
        assert!(options.replace);
        assert!(options.resolve);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_header_and_loading_state() {
        let html = render_to_string(|| {
            view! {
                <ProductsPanel
                    search=Signal::derive(|| "?page=2".to_string())
                    on_navigate=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Catálogo de Produtos"));
        assert!(html.contains("Filtros"));
        assert!(html.contains("Carregando produtos..."));
    }
}
