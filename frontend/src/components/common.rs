use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Danger,
    DangerOutlined,
    SecondaryOutlined,
    Text,
}

impl ButtonVariant {
    pub fn classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-action-primary-bg hover:bg-action-primary-bg-hover text-action-primary-text shadow-sm focus-visible:outline focus-visible:outline-2 focus-visible:outline-offset-2 focus-visible:outline-action-primary-focus",
            ButtonVariant::Secondary => "bg-surface-muted hover:bg-surface-elevated text-fg border border-border",
            ButtonVariant::Success => "bg-status-success-bg hover:bg-status-success-bg-hover text-white shadow-sm",
            ButtonVariant::Info => "bg-status-info-bg hover:bg-status-info-bg-hover text-white shadow-sm",
            ButtonVariant::Warning => "bg-status-warning-bg hover:bg-status-warning-bg-hover text-white shadow-sm",
            ButtonVariant::Danger => "bg-action-danger-bg hover:bg-action-danger-bg-hover text-action-danger-text shadow-sm",
            ButtonVariant::DangerOutlined => "border border-action-danger-bg text-action-danger-bg hover:bg-status-error-bg",
            ButtonVariant::SecondaryOutlined => "border border-border-strong text-fg-muted hover:bg-surface-muted",
            ButtonVariant::Text => "text-action-primary-bg hover:underline px-0",
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] loading: MaybeSignal<bool>,
    #[prop(attrs)] attributes: Vec<(&'static str, Attribute)>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=move || {
                format!(
                    "inline-flex items-center justify-center gap-2 rounded-md px-4 py-2 text-sm font-semibold transition-colors duration-200 disabled:opacity-50 disabled:cursor-not-allowed {} {}",
                    variant.classes(),
                    class
                )
            }
            disabled=move || disabled.get() || loading.get()
            {..attributes}
        >
            <Show when=move || loading.get()>
                <span class="h-4 w-4 animate-spin rounded-full border-2 border-current border-t-transparent"></span>
            </Show>
            {children()}
        </button>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
    Secondary,
}

impl Severity {
    pub fn tag_classes(&self) -> &'static str {
        match self {
            Severity::Success => "bg-status-success-bg text-status-success-text",
            Severity::Info => "bg-status-info-bg text-status-info-text",
            Severity::Warning => "bg-status-warning-bg text-status-warning-text",
            Severity::Danger => "bg-status-error-bg text-status-error-text",
            Severity::Secondary => "bg-surface-muted text-fg-muted",
        }
    }

    pub fn accent_color(&self) -> &'static str {
        match self {
            Severity::Success => "#10b981",
            Severity::Info => "#3b82f6",
            Severity::Warning => "#f59e0b",
            Severity::Danger => "#ef4444",
            Severity::Secondary => "#6b7280",
        }
    }
}

#[component]
pub fn Tag(
    #[prop(into)] value: MaybeSignal<String>,
    #[prop(optional)] severity: Severity,
) -> impl IntoView {
    view! {
        <span class=format!(
            "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-medium {}",
            severity.tag_classes()
        )>
            {move || value.get()}
        </span>
    }
}

#[component]
pub fn Spinner(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <div
            class=format!("animate-spin rounded-full border-b-2 border-action-primary-bg {}", class)
            role="status"
            aria-label="Carregando"
        ></div>
    }
}

/// Collapsible section with a clickable header.
#[component]
pub fn Panel(
    #[prop(into)] header: MaybeSignal<String>,
    #[prop(optional)] initially_open: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let open = create_rw_signal(initially_open);
    view! {
        <section class="rounded-lg border border-border bg-surface-elevated mb-3">
            <button
                type="button"
                class="w-full flex items-center justify-between px-4 py-3 text-sm font-semibold text-fg"
                aria-expanded=move || open.get()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span>{move || header.get()}</span>
                <span aria-hidden="true">{move || if open.get() { "▾" } else { "▸" }}</span>
            </button>
            <Show when=move || open.get()>
                <div class="px-4 pb-4">{children()}</div>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_variant_includes_primary_class() {
        let classes = ButtonVariant::Primary.classes();
        assert!(classes.contains("bg-action-primary-bg"));
    }

    #[test]
    fn danger_variants_share_danger_token() {
        assert!(ButtonVariant::Danger.classes().contains("action-danger"));
        assert!(ButtonVariant::DangerOutlined.classes().contains("action-danger"));
    }

    #[test]
    fn severity_accents_match_sync_palette() {
        assert_eq!(Severity::Success.accent_color(), crate::utils::chart::SYNC_IMPORTED_COLOR);
        assert_eq!(Severity::Danger.accent_color(), crate::utils::chart::SYNC_ERRORS_COLOR);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn button_renders_loading_indicator_and_disables() {
        let html = render_to_string(|| {
            view! { <Button variant=ButtonVariant::Danger loading=true>"Excluir"</Button> }
        });
        assert!(html.contains("Excluir"));
        assert!(html.contains("animate-spin"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn tag_uses_severity_classes() {
        let html = render_to_string(|| view! { <Tag value="electronics" severity=Severity::Success/> });
        assert!(html.contains("electronics"));
        assert!(html.contains("bg-status-success-bg"));
    }

    #[test]
    fn panel_starts_collapsed() {
        let html = render_to_string(|| {
            view! { <Panel header="Produtos Importados (3)">"conteúdo"</Panel> }
        });
        assert!(html.contains("Produtos Importados (3)"));
        assert!(!html.contains("conteúdo"));
    }
}
