use leptos::*;

use crate::state::toast::{ToastKind, ToastState};

fn icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "✓",
        ToastKind::Error => "✕",
        ToastKind::Info => "ℹ",
    }
}

#[component]
pub fn ToastHost(state: ToastState) -> impl IntoView {
    let toasts = state.toasts();
    view! {
        <div class="fixed top-4 right-4 z-[80] flex flex-col gap-2 w-80" aria-live="polite">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let state = state.clone();
                    let id = toast.id;
                    view! {
                        <div class=format!("{} flex items-start gap-3 rounded-md shadow-lg px-4 py-3 text-sm", toast.kind.css_class()) role="status">
                            <span aria-hidden="true">{icon(toast.kind)}</span>
                            <p class="flex-1">{toast.message}</p>
                            <button
                                type="button"
                                aria-label="Fechar notificação"
                                class="opacity-70 hover:opacity-100"
                                on:click=move |_| state.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
