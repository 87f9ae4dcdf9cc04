use std::collections::HashSet;

use leptos::*;

use crate::{
    api::{Product, SortField, SortOrder},
    components::{
        cached_image::{CachedImage, NO_IMAGE_PLACEHOLDER},
        common::{Spinner, Tag},
        paginator::Paginator,
    },
    router::paths,
    utils::{
        format::{format_currency, format_date, truncate_text},
        pagination::ROWS_PER_PAGE_OPTIONS,
    },
};

pub const EMPTY_MESSAGE: &str = "Nenhum produto encontrado";

/// Sort requested by clicking `clicked`: same column flips the order, a new
/// column starts ascending.
pub fn next_sort(
    current_field: Option<SortField>,
    current_order: Option<SortOrder>,
    clicked: SortField,
) -> (SortField, SortOrder) {
    if current_field == Some(clicked) {
        (clicked, current_order.unwrap_or_default().toggled())
    } else {
        (clicked, SortOrder::Asc)
    }
}

pub fn sort_indicator(active: bool, order: Option<SortOrder>) -> &'static str {
    match (active, order.unwrap_or_default()) {
        (false, _) => "↕",
        (true, SortOrder::Asc) => "↑",
        (true, SortOrder::Desc) => "↓",
    }
}

fn image_src(product: &Product) -> String {
    if product.image_url.trim().is_empty() {
        NO_IMAGE_PLACEHOLDER.to_string()
    } else {
        product.image_url.clone()
    }
}

#[component]
pub fn ProductsTable(
    #[prop(into)] products: Signal<Vec<Product>>,
    #[prop(optional, into)] loading: MaybeSignal<bool>,
    #[prop(optional, into)] total_records: MaybeSignal<u64>,
    #[prop(optional)] on_page_change: Option<Callback<(u32, u32)>>,
    #[prop(optional)] on_sort: Option<Callback<(SortField, SortOrder)>>,
    #[prop(default = 1.into(), into)] current_page: MaybeSignal<u32>,
    #[prop(default = 20.into(), into)] rows_per_page: MaybeSignal<u32>,
    #[prop(default = true)] show_pagination: bool,
    #[prop(default = true)] show_header: bool,
    #[prop(default = true)] show_dates: bool,
    #[prop(default = "Produtos".to_string(), into)] title: String,
    #[prop(optional, into)] sort_field: MaybeSignal<Option<SortField>>,
    #[prop(optional, into)] sort_order: MaybeSignal<Option<SortOrder>>,
) -> impl IntoView {
    let expanded = create_rw_signal(HashSet::<i64>::new());
    let loading = Signal::derive(move || loading.get());
    let total_records = Signal::derive(move || total_records.get());
    let sort_field = Signal::derive(move || sort_field.get());
    let sort_order = Signal::derive(move || sort_order.get());
    let column_count = if show_dates { 8 } else { 6 };

    let header_count = move || {
        if show_pagination {
            total_records.get()
        } else {
            products.with(|p| p.len() as u64)
        }
    };

    let sort_header = move |field: SortField, label: &'static str, extra: &'static str| {
        view! {
            <th class=format!("px-4 py-3 text-xs font-semibold uppercase tracking-wider text-fg-muted {}", extra)>
                <button
                    type="button"
                    class="inline-flex items-center gap-1 hover:text-fg"
                    on:click=move |_| {
                        if let Some(on_sort) = on_sort {
                            let (field, order) = next_sort(
                                sort_field.get_untracked(),
                                sort_order.get_untracked(),
                                field,
                            );
                            on_sort.call((field, order));
                        }
                    }
                >
                    {label}
                    <span aria-hidden="true">
                        {move || sort_indicator(sort_field.get() == Some(field), sort_order.get())}
                    </span>
                </button>
            </th>
        }
    };

    let toggle_row = move |id: i64| {
        expanded.update(|rows| {
            if !rows.remove(&id) {
                rows.insert(id);
            }
        })
    };

    let current_page = Signal::derive(move || current_page.get());
    let rows_per_page = Signal::derive(move || rows_per_page.get());

    view! {
        <div class="bg-surface-elevated shadow rounded-lg overflow-hidden border border-border">
            <Show when=move || show_header>
                <div class="px-4 py-3 border-b border-border">
                    <h5 class="text-base font-semibold text-fg">
                        {let title = title.clone(); move || format!("{} ({})", title, header_count())}
                    </h5>
                </div>
            </Show>
            <div class="relative overflow-x-auto">
                <Show when=move || loading.get()>
                    <div class="absolute inset-0 z-10 flex items-center justify-center bg-surface-elevated/60">
                        <Spinner class="h-8 w-8"/>
                    </div>
                </Show>
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted text-left">
                        <tr>
                            <th class="w-12 px-2"></th>
                            <th class="px-4 py-3 text-xs font-semibold uppercase tracking-wider text-fg-muted w-20">"Imagem"</th>
                            {sort_header(SortField::Title, "Produto", "min-w-[300px]")}
                            <th class="px-4 py-3 text-xs font-semibold uppercase tracking-wider text-fg-muted text-center">"Categoria"</th>
                            {sort_header(SortField::Price, "Preço", "text-right")}
                            {show_dates.then(|| view! {
                                <th class="px-4 py-3 text-xs font-semibold uppercase tracking-wider text-fg-muted">"Criado em"</th>
                                <th class="px-4 py-3 text-xs font-semibold uppercase tracking-wider text-fg-muted">"Atualizado em"</th>
                            })}
                            <th class="px-4 py-3 text-xs font-semibold uppercase tracking-wider text-fg-muted">"Ações"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        <Show when=move || products.with(|p| p.is_empty()) && !loading.get()>
                            <tr>
                                <td colspan=column_count class="px-4 py-8 text-center text-fg-muted">{EMPTY_MESSAGE}</td>
                            </tr>
                        </Show>
                        <For
                            each=move || products.get()
                            key=|product| product.id
                            children=move |product| {
                                let id = product.id;
                                let is_open = move || expanded.with(|rows| rows.contains(&id));
                                let product = store_value(product);
                                view! {
                                    <ProductRow
                                        product=product.get_value()
                                        show_dates=show_dates
                                        expanded=Signal::derive(is_open)
                                        on_toggle=Callback::new(move |_| toggle_row(id))
                                    />
                                    <Show when=is_open>
                                        <tr class="bg-surface-muted">
                                            <td colspan=column_count class="p-4">
                                                <ProductExpansion product=product.get_value() show_dates=show_dates/>
                                            </td>
                                        </tr>
                                    </Show>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
            <Show when=move || show_pagination>
                <Paginator
                    page=current_page
                    per_page=rows_per_page
                    total=total_records
                    noun="produtos"
                    on_change=Callback::new(move |change| {
                        if let Some(on_page_change) = on_page_change {
                            on_page_change.call(change);
                        }
                    })
                    rows_per_page_options=ROWS_PER_PAGE_OPTIONS.to_vec()
                />
            </Show>
        </div>
    }
}

#[component]
fn ProductRow(
    product: Product,
    show_dates: bool,
    expanded: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    let detail_href = paths::product_detail(product.id);
    view! {
        <tr class="hover:bg-surface-muted">
            <td class="px-2 text-center">
                <button
                    type="button"
                    class="text-fg-muted hover:text-fg"
                    aria-expanded=move || expanded.get()
                    aria-label="Expandir linha"
                    on:click=move |_| on_toggle.call(())
                >
                    {move || if expanded.get() { "▾" } else { "▸" }}
                </button>
            </td>
            <td class="px-4 py-2">
                <CachedImage src=image_src(&product) alt=product.title.clone() width="50" height="50" class="rounded" preview=true/>
            </td>
            <td class="px-4 py-2">
                <div class="font-semibold text-fg">{truncate_text(&product.title, 50)}</div>
                <div class="text-sm text-fg-muted mt-1">{truncate_text(&product.description, 80)}</div>
            </td>
            <td class="px-4 py-2 text-center">
                <Tag value=product.category.name.clone()/>
            </td>
            <td class="px-4 py-2 text-right font-semibold text-lg">{format_currency(product.price_value())}</td>
            {show_dates.then(|| view! {
                <td class="px-4 py-2 text-sm">{format_date(&product.created_at)}</td>
                <td class="px-4 py-2 text-sm">{format_date(&product.updated_at)}</td>
            })}
            <td class="px-4 py-2">
                <a
                    href=detail_href
                    class="inline-flex items-center justify-center rounded-full p-2 text-action-primary-bg hover:bg-surface-muted"
                    title="Ver detalhes"
                    aria-label="Ver detalhes"
                >
                    "👁"
                </a>
            </td>
        </tr>
    }
}

#[component]
fn ProductExpansion(product: Product, show_dates: bool) -> impl IntoView {
    let detail_href = paths::product_detail(product.id);
    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <div>
                <CachedImage src=image_src(&product) alt=product.title.clone() width="200" class="rounded" preview=true/>
            </div>
            <div class="md:col-span-2 space-y-3">
                <h5 class="text-base font-semibold text-fg">{product.title.clone()}</h5>
                <p class="text-sm leading-6 text-fg-muted">{product.description.clone()}</p>
                <div class="grid grid-cols-2 gap-2 text-sm">
                    <div><strong>"Categoria: "</strong>{product.category.name.clone()}</div>
                    <div><strong>"Preço: "</strong>{format_currency(product.price_value())}</div>
                    {show_dates.then(|| view! {
                        <div><strong>"Criado em: "</strong>{format_date(&product.created_at)}</div>
                        <div><strong>"Atualizado em: "</strong>{format_date(&product.updated_at)}</div>
                    })}
                </div>
                <a
                    href=detail_href
                    class="inline-flex items-center gap-2 rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                >
                    "Ver Detalhes Completos"
                </a>
            </div>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ProductCategory;
    use crate::test_support::ssr::render_to_string;

    fn product(id: i64, title: &str, price: &str) -> Product {
        Product {
            id,
            title: title.into(),
            price: price.into(),
            description: "Uma descrição".into(),
            category: ProductCategory {
                id: 1,
                name: "electronics".into(),
            },
            image_url: String::new(),
            created_at: "2024-01-15T13:30:00Z".into(),
            updated_at: "2024-01-16T13:30:00Z".into(),
        }
    }

    #[test]
    fn renders_rows_header_and_report() {
        let html = render_to_string(|| {
            let products = vec![product(1, "Monitor", "199.9"), product(2, "Teclado", "49")];
            view! {
                <ProductsTable
                    products=Signal::derive(move || products.clone())
                    total_records=41u64
                    current_page=3u32
                />
            }
        });
        assert!(html.contains("Produtos (41)"));
        assert!(html.contains("Monitor"));
        assert!(html.contains("Teclado"));
        assert!(html.contains("electronics"));
        assert!(html.contains("Criado em"));
        assert!(html.contains("Mostrando 41 a 41 de 41 produtos"));
        assert!(html.contains("/products/1"));
    }

    #[test]
    fn empty_table_without_dates_or_pagination() {
        let html = render_to_string(|| {
            view! {
                <ProductsTable
                    products=Signal::derive(Vec::new)
                    show_pagination=false
                    show_dates=false
                    title="Mais Baratos"
                />
            }
        });
        assert!(html.contains("Mais Baratos (0)"));
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("Criado em"));
        assert!(!html.contains("Mostrando"));
    }
}
