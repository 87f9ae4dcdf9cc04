use super::category_products::CategoryProducts;
use crate::{
    api::Category,
    components::{
        common::{Severity, Tag},
        paginator::Paginator,
        products_table::sort_indicator,
    },
    pages::categories::{
        utils::{parse_filter_date, CategorySortField, CATEGORIES_PER_PAGE},
        view_model::CategoriesViewModel,
    },
    utils::format::format_date_only,
};
use leptos::*;

const COLUMN_COUNT: u32 = 4;
const FILTER_INPUT_CLASS: &str =
    "w-full rounded-md border border-border bg-surface-elevated px-2 py-1 text-sm text-fg";

pub fn count_severity(count: i64) -> Severity {
    if count > 0 {
        Severity::Success
    } else {
        Severity::Secondary
    }
}

#[component]
pub fn CategoriesTable(vm: CategoriesViewModel) -> impl IntoView {
    let all = vm.all();
    let visible = vm.visible();
    let rows = vm.page_rows();
    let sort = vm.sort;

    let sort_header = move |field: CategorySortField, label: &'static str, extra: &'static str| {
        let indicator = move || {
            let current = sort.get();
            sort_indicator(current.map(|(f, _)| f) == Some(field), current.map(|(_, order)| order))
        };
        view! {
            <th class=format!("px-4 py-3 text-xs font-semibold uppercase tracking-wider text-fg-muted {}", extra)>
                <button
                    type="button"
                    class="inline-flex items-center gap-1 hover:text-fg"
                    on:click=move |_| vm.toggle_sort(field)
                >
                    {label}
                    <span aria-hidden="true">{indicator}</span>
                </button>
            </th>
        }
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg overflow-hidden border border-border">
            <div class="px-2 py-1 text-center border-b border-border">
                <span class="text-xs font-medium">
                    {move || format!("Categorias ({})", all.with(|c| c.as_ref().map_or(0, Vec::len)))}
                </span>
            </div>
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted text-left">
                        <tr>
                            <th class="w-12 px-2"></th>
                            {sort_header(CategorySortField::Name, "Nome da Categoria", "")}
                            {sort_header(CategorySortField::ProductsCount, "Produtos", "w-[200px] text-center")}
                            {sort_header(CategorySortField::CreatedAt, "Criado em", "w-[150px]")}
                        </tr>
                        <tr>
                            <th></th>
                            <th class="px-4 pb-2">
                                <input
                                    type="text"
                                    class=FILTER_INPUT_CLASS
                                    placeholder="Buscar por nome"
                                    prop:value=move || vm.row_filters.with(|f| f.name.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        vm.update_filters(|f| f.name = value);
                                    }
                                />
                            </th>
                            <th class="px-4 pb-2">
                                <input
                                    type="number"
                                    class=FILTER_INPUT_CLASS
                                    placeholder="Qtd produtos"
                                    prop:value=move || vm.row_filters.with(|f| f.products_count.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        vm.update_filters(|f| f.products_count = value);
                                    }
                                />
                            </th>
                            <th class="px-4 pb-2">
                                <input
                                    type="date"
                                    class=FILTER_INPUT_CLASS
                                    placeholder="Data"
                                    on:change=move |ev| {
                                        let value = parse_filter_date(&event_target_value(&ev));
                                        vm.update_filters(|f| f.created_on = value);
                                    }
                                />
                            </th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        <Show when=move || visible.with(|v| v.is_empty())>
                            <tr>
                                <td colspan=COLUMN_COUNT class="px-4 py-8 text-center text-fg-muted">
                                    "Nenhuma categoria encontrada"
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || rows.get()
                            key=|category| category.id
                            children=move |category| {
                                let id = category.id;
                                let is_open = move || vm.expanded.with(|ids| ids.contains(&id));
                                let name = category.name.clone();
                                view! {
                                    <CategoryRow category=category expanded=Signal::derive(is_open) vm=vm/>
                                    <Show when=is_open>
                                        <tr class="bg-surface-muted">
                                            <td colspan=COLUMN_COUNT>
                                                <CategoryProducts vm=vm category=name.clone()/>
                                            </td>
                                        </tr>
                                    </Show>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
            <Paginator
                page=vm.page
                per_page=Signal::derive(|| CATEGORIES_PER_PAGE)
                total=Signal::derive(move || visible.with(|v| v.len() as u64))
                noun="categorias"
                on_change=Callback::new(move |(page, _)| vm.page.set(page))
            />
        </div>
    }
}

#[component]
fn CategoryRow(
    category: Category,
    expanded: Signal<bool>,
    vm: CategoriesViewModel,
) -> impl IntoView {
    let id = category.id;
    view! {
        <tr class="hover:bg-surface-muted">
            <td class="px-2 text-center">
                <button
                    type="button"
                    class="text-fg-muted hover:text-fg"
                    aria-expanded=move || expanded.get()
                    aria-label="Expandir linha"
                    on:click=move |_| vm.toggle_expanded(id)
                >
                    {move || if expanded.get() { "▾" } else { "▸" }}
                </button>
            </td>
            <td class="px-4 py-2">
                <div class="flex items-center gap-2">
                    <span class="text-action-primary-bg" aria-hidden="true">"🏷"</span>
                    <span class="font-semibold">{category.name.clone()}</span>
                </div>
            </td>
            <td class="px-4 py-2 text-center">
                <Tag
                    value=format!("{} produtos", category.products_count)
                    severity=count_severity(category.products_count)
                />
            </td>
            <td class="px-4 py-2">{format_date_only(&category.created_at)}</td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_categories_use_secondary_tag() {
        assert_eq!(count_severity(0), Severity::Secondary);
        assert_eq!(count_severity(3), Severity::Success);
    }
}
