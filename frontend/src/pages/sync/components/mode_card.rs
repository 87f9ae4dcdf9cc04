use crate::{
    api::SyncMode,
    components::common::Button,
    pages::sync::utils::{button_label, parse_limit, ModeCard, MAX_LIMIT, MIN_LIMIT},
};
use leptos::*;

#[component]
pub fn SyncModeCard(
    card: ModeCard,
    limit: RwSignal<u32>,
    disabled: Signal<bool>,
    on_sync: Callback<SyncMode>,
) -> impl IntoView {
    let mode = card.mode;
    view! {
        <div class="flex h-full flex-col bg-surface-elevated shadow rounded-lg border border-border p-6">
            <h3 class="text-lg font-semibold text-fg mb-3">{card.title}</h3>
            <p class="text-fg-muted mb-3 leading-relaxed">{mode.description()}</p>
            <div class="flex items-center gap-2 mb-4">
                <span class="text-status-info-text" aria-hidden="true">"ℹ"</span>
                <span class="text-sm text-fg-muted">{card.hint}</span>
            </div>
            {(mode == SyncMode::Limited).then(|| view! {
                <div class="mb-4">
                    <label for="limit" class="block text-sm font-medium mb-2">"Número de produtos:"</label>
                    <input
                        id="limit"
                        type="number"
                        min=MIN_LIMIT
                        max=MAX_LIMIT
                        class="w-full rounded-md border border-border bg-surface-elevated px-3 py-2 text-fg"
                        prop:value=move || limit.get().to_string()
                        on:change=move |ev| limit.set(parse_limit(&event_target_value(&ev)))
                    />
                </div>
            })}
            <div class="mt-auto">
                <Button
                    variant=card.variant
                    class="w-full"
                    disabled=disabled
                    on:click=move |_| on_sync.call(mode)
                >
                    {move || button_label(mode, limit.get())}
                    <span aria-hidden="true">{card.icon}</span>
                </Button>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::sync::utils::MODE_CARDS;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn limited_card_has_limit_input() {
        let html = render_to_string(|| {
            view! {
                <SyncModeCard
                    card=MODE_CARDS[2]
                    limit=create_rw_signal(5)
                    disabled=Signal::derive(|| false)
                    on_sync=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Importar por quantidade"));
        assert!(html.contains("Número de produtos:"));
        assert!(html.contains("Importar 5"));
    }

    #[test]
    fn full_card_is_disabled_while_syncing() {
        let html = render_to_string(|| {
            view! {
                <SyncModeCard
                    card=MODE_CARDS[0]
                    limit=create_rw_signal(5)
                    disabled=Signal::derive(|| true)
                    on_sync=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Importar Tudo"));
        assert!(html.contains("disabled"));
        assert!(!html.contains("Número de produtos:"));
    }
}
