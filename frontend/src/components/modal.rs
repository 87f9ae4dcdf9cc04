use leptos::ev::KeyboardEvent;
use leptos::*;

/// Generic dialog with a header, scrollable body and optional footer.
#[component]
pub fn Modal(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    on_close: Callback<()>,
    #[prop(optional, into)] class: String,
    #[prop(optional)] footer: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let title = Signal::derive(move || title.get());
    let children = store_value(children);
    let footer = store_value(footer);
    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Fechar"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class=format!(
                        "relative z-[61] w-full max-h-[90vh] flex flex-col rounded-lg bg-surface-elevated shadow-xl border border-border {}",
                        class
                    )
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_close.call(());
                        }
                    }
                >
                    <div class="flex items-center justify-between gap-3 border-b border-border px-6 py-4">
                        <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                        <button
                            type="button"
                            aria-label="Fechar"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_close.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <div class="overflow-y-auto px-6 py-4">
                        {children.with_value(|children| children())}
                    </div>
                    {move || {
                        footer
                            .get_value()
                            .map(|footer| {
                                view! {
                                    <div class="flex justify-end gap-2 border-t border-border px-6 py-3">
                                        {footer.run()}
                                    </div>
                                }
                            })
                    }}
                </div>
            </div>
        </Show>
    }
}
