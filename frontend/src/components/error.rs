use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2" role="alert">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let mut meta = Vec::new();
                    if !e.code.is_empty() && e.code != "UNKNOWN" {
                        meta.push(format!("Código: {}", e.code));
                    }
                    if let Some(status) = e.status {
                        meta.push(format!("HTTP {}", status));
                    }
                    if let Some(id) = e.request_id.filter(|id| !id.is_empty()) {
                        meta.push(format!("ID: {}", id));
                    }
                    if meta.is_empty() {
                        ().into_view()
                    } else {
                        view! { <div class="text-xs opacity-75">{meta.join(" · ")}</div> }.into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}
