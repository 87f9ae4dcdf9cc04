use leptos::*;

#[component]
pub fn StatsCard(
    #[prop(into)] label: String,
    #[prop(into)] value: MaybeSignal<String>,
    icon: &'static str,
    #[prop(optional)] small: bool,
) -> impl IntoView {
    let value_class = if small {
        "text-2xl font-bold text-fg"
    } else {
        "text-3xl font-extrabold text-fg"
    };
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg border border-border">
            <div class="flex items-center gap-4 p-6">
                <div class="flex h-12 w-12 shrink-0 items-center justify-center rounded-full bg-action-primary-bg text-action-primary-text text-xl" aria-hidden="true">
                    {icon}
                </div>
                <div>
                    <div class=value_class>{move || value.get()}</div>
                    <div class="text-sm font-medium text-fg-muted">{label}</div>
                </div>
            </div>
        </div>
    }
}

/// Clickable quick-action tile linking to `href`.
#[component]
pub fn ActionCard(
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    icon: &'static str,
    href: &'static str,
    #[prop(optional, into)] accent: String,
) -> impl IntoView {
    view! {
        <a
            href=href
            class="group block bg-surface-elevated shadow rounded-lg border border-border p-6 text-center transition-shadow hover:shadow-lg"
        >
            <div
                class=format!("mx-auto mb-4 flex h-14 w-14 items-center justify-center rounded-full text-2xl text-white {}", accent)
                aria-hidden="true"
            >
                {icon}
            </div>
            <h3 class="text-lg font-semibold text-fg">{title}</h3>
            <p class="mt-2 text-sm text-fg-muted">{description}</p>
            <span class="mt-4 inline-flex items-center gap-2 rounded-md border border-status-info-border px-4 py-2 text-sm font-semibold text-status-info-text group-hover:bg-status-info-bg">
                "Acessar" <span aria-hidden="true">"→"</span>
            </span>
        </a>
    }
}
