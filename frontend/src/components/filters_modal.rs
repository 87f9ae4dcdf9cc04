use leptos::*;

use crate::{
    api::{ProductFilters, SortField, SortOrder},
    components::{
        common::{Button, ButtonVariant},
        modal::Modal,
    },
};

/// Filters committed by "Aplicar Filtros": the draft, back on page 1.
pub fn applied(draft: &ProductFilters) -> ProductFilters {
    ProductFilters {
        page: Some(1),
        ..draft.clone()
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let raw = raw.trim().replace(',', ".");
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn toggle_category(selected: &mut Vec<String>, category: &str) {
    if let Some(pos) = selected.iter().position(|c| c == category) {
        selected.remove(pos);
    } else {
        selected.push(category.to_string());
    }
}

#[component]
pub fn ProductFiltersModal(
    is_open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(into)] filters: Signal<ProductFilters>,
    on_apply: Callback<ProductFilters>,
    #[prop(into)] categories: Signal<Vec<String>>,
    #[prop(optional, into)] loading: MaybeSignal<bool>,
) -> impl IntoView {
    let draft = create_rw_signal(filters.get_untracked());
    create_effect(move |_| draft.set(filters.get()));
    let loading = Signal::derive(move || loading.get());

    let apply = move |_| {
        on_apply.call(applied(&draft.get_untracked()));
        on_close.call(());
    };
    let clear = move |_| {
        let cleared = draft.get_untracked().cleared();
        draft.set(cleared.clone());
        on_apply.call(cleared);
        on_close.call(());
    };

    let footer = ViewFn::from(move || {
        view! {
            <Show when=move || draft.with(ProductFilters::has_any_filter)>
                <Button variant=ButtonVariant::SecondaryOutlined disabled=loading on:click=clear>
                    "Limpar" <span aria-hidden="true">"✕"</span>
                </Button>
            </Show>
            <Button disabled=loading on:click=apply>
                "Aplicar Filtros" <span aria-hidden="true">"🔍"</span>
            </Button>
        }
    });

    let label = "block text-sm font-medium text-fg mb-1";
    let input = "w-full rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg focus:outline-none focus:ring-2 focus:ring-action-primary-focus disabled:opacity-50";

    view! {
        <Modal
            is_open=is_open
            title="Filtros dos Produtos"
            on_close=on_close
            class="max-w-xl"
            footer=footer
        >
            <div class="grid grid-cols-2 gap-4">
                <div class="col-span-2">
                    <label for="filter-search" class=label>"Buscar Produto"</label>
                    <input
                        id="filter-search"
                        type="text"
                        class=input
                        placeholder="Digite o nome do produto..."
                        disabled=move || loading.get()
                        prop:value=move || draft.with(|d| d.q.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.q = (!value.is_empty()).then_some(value));
                        }
                    />
                </div>
                <fieldset class="col-span-2">
                    <legend class=label>"Categorias"</legend>
                    <div class="flex flex-wrap gap-2">
                        {move || {
                            let options = categories.get();
                            if options.is_empty() {
                                return view! {
                                    <p class="text-sm text-fg-muted">"Selecione uma ou mais categorias"</p>
                                }
                                .into_view();
                            }
                            options
                                .into_iter()
                                .map(|category| {
                                    let name = category.clone();
                                    let checked = move || draft.with(|d| d.categories.contains(&name));
                                    let toggled = category.clone();
                                    view! {
                                        <label class="inline-flex items-center gap-2 rounded-full border border-border px-3 py-1 text-sm text-fg">
                                            <input
                                                type="checkbox"
                                                disabled=move || loading.get()
                                                prop:checked=checked
                                                on:change=move |_| draft.update(|d| toggle_category(&mut d.categories, &toggled))
                                            />
                                            {category}
                                        </label>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </fieldset>
                <div>
                    <label for="filter-min-price" class=label>"Preço Mínimo"</label>
                    <input
                        id="filter-min-price"
                        type="number"
                        min="0"
                        step="0.01"
                        class=input
                        disabled=move || loading.get()
                        prop:value=move || draft.with(|d| d.min_price.map(|v| v.to_string()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = parse_price(&event_target_value(&ev));
                            draft.update(|d| d.min_price = value);
                        }
                    />
                </div>
                <div>
                    <label for="filter-max-price" class=label>"Preço Máximo"</label>
                    <input
                        id="filter-max-price"
                        type="number"
                        min="0"
                        step="0.01"
                        class=input
                        disabled=move || loading.get()
                        prop:value=move || draft.with(|d| d.max_price.map(|v| v.to_string()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = parse_price(&event_target_value(&ev));
                            draft.update(|d| d.max_price = value);
                        }
                    />
                </div>
                <div>
                    <label for="filter-sort" class=label>"Ordenar por"</label>
                    <select
                        id="filter-sort"
                        class=input
                        disabled=move || loading.get()
                        on:change=move |ev| {
                            let value = SortField::parse(&event_target_value(&ev));
                            draft.update(|d| d.sort = value);
                        }
                    >
                        <option value="" selected=move || draft.with(|d| d.sort.is_none())>"Selecione o campo"</option>
                        {[SortField::Price, SortField::Title]
                            .into_iter()
                            .map(|field| view! {
                                <option
                                    value=field.as_str()
                                    selected=move || draft.with(|d| d.sort == Some(field))
                                >
                                    {field.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
                <div>
                    <label for="filter-order" class=label>"Ordem"</label>
                    <select
                        id="filter-order"
                        class=input
                        disabled=move || loading.get()
                        on:change=move |ev| {
                            let value = SortOrder::parse(&event_target_value(&ev));
                            draft.update(|d| d.order = value);
                        }
                    >
                        {[SortOrder::Asc, SortOrder::Desc]
                            .into_iter()
                            .map(|order| view! {
                                <option
                                    value=order.as_str()
                                    selected=move || draft.with(|d| d.order.unwrap_or_default() == order)
                                >
                                    {order.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>
        </Modal>
    }
}
