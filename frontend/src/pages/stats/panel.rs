use super::view_model::{category_chart, most_expensive, use_stats_view_model};
use crate::{
    api::{Product, Stats},
    components::{
        cards::StatsCard,
        chart::DoughnutChart,
        common::{Spinner, Tag},
        products_table::ProductsTable,
    },
    utils::format::{format_currency, format_number},
};
use leptos::*;

#[component]
pub fn StatsPage() -> impl IntoView {
    let vm = use_stats_view_model();
    let cheapest = vm.cheapest();
    let cheapest_loading = vm.cheapest_loading();

    move || match vm.stats_resource.get() {
        None => view! {
            <div class="bg-surface-elevated shadow rounded-lg p-6 text-center">
                <Spinner class="h-10 w-10 mx-auto"/>
                <p class="mt-3 text-fg-muted">"Carregando estatísticas..."</p>
            </div>
        }
        .into_view(),
        Some(Err(err)) => {
            log::error!("Failed to load stats: {}", err);
            view! {
                <div class="bg-surface-elevated shadow rounded-lg p-6 text-center">
                    <p class="text-4xl text-status-error-text mb-3" aria-hidden="true">"⚠"</p>
                    <h3 class="text-lg font-semibold text-fg">"Erro ao carregar estatísticas"</h3>
                    <p class="text-fg-muted">"Verifique sua conexão e tente novamente."</p>
                </div>
            }
            .into_view()
        }
        Some(Ok(stats)) => view! {
            <StatsContent stats=stats cheapest=cheapest cheapest_loading=cheapest_loading/>
        }
        .into_view(),
    }
}

#[component]
fn SectionCard(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg border border-border p-4">
            <h3 class="text-lg font-semibold text-fg mb-3">{title}</h3>
            {children()}
        </div>
    }
}

#[component]
pub fn StatsContent(
    stats: Stats,
    cheapest: Signal<Vec<Product>>,
    cheapest_loading: Signal<bool>,
) -> impl IntoView {
    let chart_items = category_chart(&stats);
    let expensive = most_expensive(&stats);
    let category_rows = stats.by_category.clone();

    view! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold text-fg">"Estatísticas"</h2>
            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                <StatsCard label="Total de Produtos" value=format_number(stats.total_products as f64) icon="🛒"/>
                <StatsCard label="Preço Médio" value=format_currency(stats.avg_price) icon="$" small=true/>
                <StatsCard label="Categorias" value=stats.by_category.len().to_string() icon="🏷"/>
                <StatsCard label="Top Produtos" value=stats.top5_expensive.len().to_string() icon="★"/>
            </div>
            <div class="grid grid-cols-1 gap-6 md:grid-cols-2">
                <SectionCard title="Produtos por Categoria">
                    <DoughnutChart items=Signal::derive(move || chart_items.clone())/>
                </SectionCard>
                <SectionCard title="Detalhes por Categoria">
                    <table class="min-w-full divide-y divide-border text-sm">
                        <thead class="bg-surface-muted text-left">
                            <tr>
                                <th class="px-4 py-2 text-xs font-semibold uppercase text-fg-muted">"Categoria"</th>
                                <th class="px-4 py-2 text-xs font-semibold uppercase text-fg-muted w-[140px] text-center">"Produtos"</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            {if category_rows.is_empty() {
                                view! {
                                    <tr>
                                        <td colspan="2" class="px-4 py-6 text-center text-fg-muted">"Nenhuma categoria encontrada"</td>
                                    </tr>
                                }
                                .into_view()
                            } else {
                                category_rows
                                    .into_iter()
                                    .map(|row| view! {
                                        <tr>
                                            <td class="px-4 py-2">
                                                <div class="flex items-center gap-2">
                                                    <span class="text-action-primary-bg" aria-hidden="true">"🏷"</span>
                                                    <span class="font-semibold">{row.category}</span>
                                                </div>
                                            </td>
                                            <td class="px-4 py-2 text-center">
                                                <Tag value=format_number(row.total as f64)/>
                                            </td>
                                        </tr>
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </SectionCard>
                <SectionCard title="Top 5 Produtos Mais Caros">
                    <ProductsTable
                        products=Signal::derive(move || expensive.clone())
                        show_pagination=false
                        show_header=false
                        show_dates=false
                    />
                </SectionCard>
                <SectionCard title="Top 5 Produtos Mais Baratos">
                    <ProductsTable
                        products=cheapest
                        loading=cheapest_loading
                        show_pagination=false
                        show_header=false
                        show_dates=false
                    />
                </SectionCard>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::stats_json;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn page_shows_loading_first() {
        let html = render_to_string(|| view! { <StatsPage/> });
        assert!(html.contains("Carregando estatísticas..."));
    }

    #[test]
    fn content_renders_cards_chart_and_tables() {
        let html = render_to_string(|| {
            let stats: Stats = serde_json::from_value(stats_json()["data"].clone()).unwrap();
            view! {
                <StatsContent
                    stats=stats
                    cheapest=Signal::derive(Vec::new)
                    cheapest_loading=Signal::derive(|| false)
                />
            }
        });
        assert!(html.contains("Total de Produtos"));
        assert!(html.contains("Preço Médio"));
        assert!(html.contains("Produtos por Categoria"));
        assert!(html.contains("Detalhes por Categoria"));
        assert!(html.contains("electronics: 6 (60.0%)"));
        assert!(html.contains("Samsung 49-Inch CHG90"));
        assert!(html.contains("Top 5 Produtos Mais Baratos"));
        assert!(html.contains("Nenhum produto encontrado"));
    }
}
