use leptos::*;

use crate::utils::pagination::{page_count, page_links, page_report};

/// First/prev/page links/next/last, the page report and, when
/// `rows_per_page_options` is non-empty, a rows-per-page select.
/// `on_change` receives `(page, per_page)`.
#[component]
pub fn Paginator(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] per_page: Signal<u32>,
    #[prop(into)] total: Signal<u64>,
    noun: &'static str,
    on_change: Callback<(u32, u32)>,
    #[prop(optional)] rows_per_page_options: Vec<u32>,
) -> impl IntoView {
    let last_page = Signal::derive(move || page_count(total.get(), per_page.get()));
    let go_to = move |target: u32| {
        let target = target.clamp(1, last_page.get_untracked());
        if target != page.get_untracked() {
            on_change.call((target, per_page.get_untracked()));
        }
    };
    let nav_button = "px-2 py-1 rounded-md text-sm text-fg-muted hover:bg-surface-muted disabled:opacity-40 disabled:cursor-not-allowed";
    let has_options = !rows_per_page_options.is_empty();
    let options = store_value(rows_per_page_options);

    view! {
        <div class="flex flex-wrap items-center justify-between gap-3 px-4 py-3 border-t border-border">
            <div class="flex items-center gap-1">
                <button type="button" class=nav_button aria-label="Primeira página"
                    disabled=move || page.get() <= 1
                    on:click=move |_| go_to(1)
                >"«"</button>
                <button type="button" class=nav_button aria-label="Página anterior"
                    disabled=move || page.get() <= 1
                    on:click=move |_| go_to(page.get_untracked().saturating_sub(1))
                >"‹"</button>
                {move || {
                    let current = page.get();
                    page_links(current, last_page.get())
                        .into_iter()
                        .map(|n| {
                            let class = if n == current {
                                "px-3 py-1 rounded-md text-sm bg-action-primary-bg text-action-primary-text"
                            } else {
                                "px-3 py-1 rounded-md text-sm text-fg hover:bg-surface-muted"
                            };
                            view! {
                                <button
                                    type="button"
                                    class=class
                                    aria-current=(n == current).then_some("page")
                                    on:click=move |_| go_to(n)
                                >
                                    {n}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button type="button" class=nav_button aria-label="Próxima página"
                    disabled=move || page.get() >= last_page.get()
                    on:click=move |_| go_to(page.get_untracked() + 1)
                >"›"</button>
                <button type="button" class=nav_button aria-label="Última página"
                    disabled=move || page.get() >= last_page.get()
                    on:click=move |_| go_to(last_page.get_untracked())
                >"»"</button>
            </div>
            <div class="flex items-center gap-3 text-sm text-fg-muted">
                <span>{move || page_report(page.get(), per_page.get(), total.get(), noun)}</span>
                <Show when=move || has_options>
                    <select
                        class="rounded-md border border-border bg-surface-elevated px-2 py-1 text-sm text-fg"
                        aria-label="Itens por página"
                        on:change=move |ev| {
                            if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                                on_change.call((1, size));
                            }
                        }
                    >
                        {move || {
                            let current = per_page.get();
                            options
                                .get_value()
                                .into_iter()
                                .map(|size| view! {
                                    <option value=size.to_string() selected=size == current>{size}</option>
                                })
                                .collect_view()
                        }}
                    </select>
                </Show>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use crate::utils::pagination::ROWS_PER_PAGE_OPTIONS;

    #[test]
    fn renders_report_and_page_links() {
        let html = render_to_string(|| {
            view! {
                <Paginator
                    page=Signal::derive(|| 2)
                    per_page=Signal::derive(|| 20)
                    total=Signal::derive(|| 41)
                    noun="produtos"
                    on_change=Callback::new(|_| {})
                    rows_per_page_options=ROWS_PER_PAGE_OPTIONS.to_vec()
                />
            }
        });
        assert!(html.contains("Mostrando 21 a 40 de 41 produtos"));
        assert!(html.contains("Itens por página"));
        assert!(html.contains("aria-current=\"page\""));
    }

    #[test]
    fn hides_rows_select_without_options() {
        let html = render_to_string(|| {
            view! {
                <Paginator
                    page=Signal::derive(|| 1)
                    per_page=Signal::derive(|| 5)
                    total=Signal::derive(|| 3)
                    noun="itens"
                    on_change=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Mostrando 1 a 3 de 3 itens"));
        assert!(!html.contains("Itens por página"));
    }
}
