use crate::{
    api::{SyncError, SyncResult},
    components::{cards::StatsCard, common::Panel, layout::ErrorMessage, paginator::Paginator},
    pages::sync::utils::{skipped_rows, synced_rows, ResultRow, RESULT_ROWS_PER_PAGE},
    utils::pagination::paginate_slice,
};
use leptos::*;

const TH_CLASS: &str = "px-4 py-2 text-xs font-semibold uppercase text-fg-muted";

/// Locally paginated product list inside a result panel.
#[component]
pub fn ResultProductsTable(
    rows: Vec<ResultRow>,
    last_header: &'static str,
    empty_message: &'static str,
) -> impl IntoView {
    let page = create_rw_signal(1u32);
    let total = rows.len() as u64;
    let rows = store_value(rows);
    let visible =
        move || rows.with_value(|rows| paginate_slice(rows, page.get(), RESULT_ROWS_PER_PAGE));

    view! {
        <table class="min-w-full divide-y divide-border text-sm">
            <thead class="bg-surface-muted text-left">
                <tr>
                    <th class=TH_CLASS>"Produto"</th>
                    <th class=format!("{} w-[120px]", TH_CLASS)>"ID Externo"</th>
                    <th class=TH_CLASS>{last_header}</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-border">
                {(total == 0).then(|| view! {
                    <tr><td colspan="3" class="px-4 py-4 text-center text-fg-muted">{empty_message}</td></tr>
                })}
                <For
                    each=visible
                    key=|row| row.key
                    children=|row| view! {
                        <tr>
                            <td class="px-4 py-2">{row.title}</td>
                            <td class="px-4 py-2">{row.external_id}</td>
                            <td class="px-4 py-2">{row.last}</td>
                        </tr>
                    }
                />
            </tbody>
        </table>
        {(total > 0).then(|| view! {
            <Paginator
                page=page
                per_page=Signal::derive(|| RESULT_ROWS_PER_PAGE)
                total=Signal::derive(move || total)
                noun="produtos"
                on_change=Callback::new(move |(next, _)| page.set(next))
            />
        })}
    }
}

#[component]
fn SyncErrorsTable(errors: Vec<SyncError>) -> impl IntoView {
    view! {
        <table class="min-w-full divide-y divide-border text-sm">
            <thead class="bg-surface-muted text-left">
                <tr>
                    <th class=format!("{} w-[120px]", TH_CLASS)>"ID Produto"</th>
                    <th class=TH_CLASS>"Erro"</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-border">
                {if errors.is_empty() {
                    view! { <tr><td colspan="2" class="px-4 py-4 text-center text-fg-muted">"Nenhum erro"</td></tr> }
                        .into_view()
                } else {
                    errors
                        .into_iter()
                        .map(|error| view! {
                            <tr>
                                <td class="px-4 py-2">
                                    {error.context.product_id.map(|id| id.to_string()).unwrap_or_default()}
                                </td>
                                <td class="px-4 py-2">{error.message}</td>
                            </tr>
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

/// Counts plus collapsible per-outcome tables for one sync result.
#[component]
pub fn SyncResultSummary(result: SyncResult) -> impl IntoView {
    let error_count = result.errors.len();
    let imported = result
        .imported_products
        .as_deref()
        .filter(|_| result.imported > 0)
        .map(synced_rows);
    let updated = result
        .updated_products
        .as_deref()
        .filter(|_| result.updated > 0)
        .map(synced_rows);
    let skipped = result
        .skipped_products
        .as_deref()
        .filter(|_| result.skipped > 0)
        .map(skipped_rows);
    let errors = result.errors.clone();

    view! {
        <div class="space-y-4">
            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                <StatsCard label="Importados" value=result.imported.to_string() icon="⊕"/>
                <StatsCard label="Atualizados" value=result.updated.to_string() icon="⟳"/>
                <StatsCard label="Ignorados" value=result.skipped.to_string() icon="⊖"/>
                <StatsCard label="Erros" value=error_count.to_string() icon="⊗"/>
            </div>
            {imported.map(|rows| view! {
                <Panel header=format!("Produtos Importados ({})", result.imported)>
                    <ResultProductsTable rows=rows.clone() last_header="ID Interno" empty_message="Nenhum produto importado"/>
                </Panel>
            })}
            {updated.map(|rows| view! {
                <Panel header=format!("Produtos Atualizados ({})", result.updated)>
                    <ResultProductsTable rows=rows.clone() last_header="ID Interno" empty_message="Nenhum produto atualizado"/>
                </Panel>
            })}
            {skipped.map(|rows| view! {
                <Panel header=format!("Produtos Ignorados ({})", result.skipped)>
                    <ResultProductsTable rows=rows.clone() last_header="Motivo" empty_message="Nenhum produto ignorado"/>
                </Panel>
            })}
            {(error_count > 0).then(|| view! {
                <div>
                    <ErrorMessage message=format!("{} erro(s) encontrado(s)", error_count)/>
                    <Panel header="Detalhes dos Erros">
                        <SyncErrorsTable errors=errors.clone()/>
                    </Panel>
                </div>
            })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::sync_json;
    use crate::api::{SyncErrorContext, SyncResponse};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn summary_shows_counts_and_panels_for_non_zero_outcomes() {
        let html = render_to_string(|| {
            let response: SyncResponse = serde_json::from_value(sync_json("full")).unwrap();
            view! { <SyncResultSummary result=response.result/> }
        });
        assert!(html.contains("Importados"));
        assert!(html.contains("Produtos Importados (3)"));
        assert!(html.contains("Produtos Ignorados (1)"));
        assert!(html.contains("Produtos Atualizados (1)"));
        assert!(!html.contains("erro(s) encontrado(s)"));
    }

    #[test]
    fn errors_are_announced() {
        let html = render_to_string(|| {
            let result = SyncResult {
                errors: vec![SyncError {
                    message: "timeout".into(),
                    context: SyncErrorContext { product_id: Some(4) },
                }],
                ..Default::default()
            };
            view! { <SyncResultSummary result=result/> }
        });
        assert!(html.contains("1 erro(s) encontrado(s)"));
        assert!(html.contains("Detalhes dos Erros"));
    }

    #[test]
    fn products_table_paginates_by_five() {
        let html = render_to_string(|| {
            let rows = (1..=7)
                .map(|i| ResultRow {
                    key: i,
                    title: format!("Produto {}", i),
                    external_id: i + 100,
                    last: i.to_string(),
                })
                .collect::<Vec<_>>();
            view! { <ResultProductsTable rows=rows last_header="ID Interno" empty_message="vazio"/> }
        });
        assert!(html.contains("Produto 5"));
        assert!(!html.contains("Produto 6"));
        assert!(html.contains("Mostrando 1 a 5 de 7 produtos"));
    }
}
