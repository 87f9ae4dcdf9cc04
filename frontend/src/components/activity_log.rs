use leptos::*;
use serde_json::Value;

use crate::{
    api::{ActivityEvent, ActivityLog, ApiError},
    components::common::{Severity, Spinner, Tag},
    utils::format::format_date_time_seconds,
};

pub fn event_severity(event: ActivityEvent) -> Severity {
    match event {
        ActivityEvent::Created => Severity::Success,
        ActivityEvent::Updated => Severity::Info,
        ActivityEvent::Deleted => Severity::Danger,
        ActivityEvent::Other => Severity::Secondary,
    }
}

fn event_icon(event: ActivityEvent) -> &'static str {
    match event {
        ActivityEvent::Created => "+",
        ActivityEvent::Updated => "✎",
        ActivityEvent::Deleted => "🗑",
        ActivityEvent::Other => "ℹ",
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}

/// Human summary of what an activity changed.
pub fn describe_changes(activity: &ActivityLog) -> String {
    match activity.event {
        ActivityEvent::Created => return "Produto criado no sistema".to_string(),
        ActivityEvent::Deleted => return "Produto removido do sistema".to_string(),
        ActivityEvent::Updated => {
            let props = &activity.properties;
            if let (Some(old), Some(attributes)) = (&props.old, &props.attributes) {
                let changes: Vec<String> = attributes
                    .iter()
                    .filter(|(key, new)| old.get(key.as_str()) != Some(*new))
                    .map(|(key, new)| {
                        let old_value = display_value(old.get(key.as_str()));
                        let new_value = display_value(Some(new));
                        match key.as_str() {
                            "title" => {
                                format!("Título alterado de \"{}\" para \"{}\"", old_value, new_value)
                            }
                            "price" => {
                                format!("Preço alterado de R$ {} para R$ {}", old_value, new_value)
                            }
                            "description" => "Descrição alterada".to_string(),
                            "image_url" => "Imagem alterada".to_string(),
                            other => format!("{} alterado", other),
                        }
                    })
                    .collect();
                return if changes.is_empty() {
                    "Produto atualizado".to_string()
                } else {
                    changes.join(", ")
                };
            }
        }
        ActivityEvent::Other => {}
    }
    if activity.description.trim().is_empty() {
        "Atividade registrada".to_string()
    } else {
        activity.description.clone()
    }
}

#[component]
fn ActivityCardFrame(children: Children) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg border border-border p-6">{children()}</div>
    }
}

#[component]
fn ActivityEntry(activity: ActivityLog) -> impl IntoView {
    let severity = event_severity(activity.event);
    let changes = describe_changes(&activity);
    view! {
        <li class="relative flex gap-4 pb-6 last:pb-0">
            <span
                class="z-10 flex h-8 w-8 shrink-0 items-center justify-center rounded-full text-white shadow"
                style=format!("background-color: {}", severity.accent_color())
                aria-hidden="true"
            >
                {event_icon(activity.event)}
            </span>
            <div class="flex-1 rounded-md border border-border p-4">
                <div class="flex items-start justify-between mb-2">
                    <div class="flex items-center gap-2">
                        <Tag value=activity.event.as_str().to_uppercase() severity=severity/>
                        <span class="text-sm text-fg-muted">{format!("por {}", activity.causer_name())}</span>
                    </div>
                    <span class="text-xs text-fg-muted">{format_date_time_seconds(&activity.created_at)}</span>
                </div>
                <p class="text-sm text-fg leading-6">{changes}</p>
            </div>
        </li>
    }
}

#[component]
pub fn ProductActivityLog(
    #[prop(into)] activities: Signal<Option<Result<Vec<ActivityLog>, ApiError>>>,
) -> impl IntoView {
    move || match activities.get() {
        None => view! {
            <ActivityCardFrame>
                <div class="text-center p-4">
                    <Spinner class="h-8 w-8 mx-auto"/>
                    <p class="mt-3 text-fg-muted">"Carregando histórico..."</p>
                </div>
            </ActivityCardFrame>
        }
        .into_view(),
        Some(Err(_)) => view! {
            <ActivityCardFrame>
                <div class="text-center p-4">
                    <p class="text-3xl text-status-warning-text mb-3" aria-hidden="true">"⚠"</p>
                    <p class="text-fg-muted">"Erro ao carregar histórico de atividades"</p>
                </div>
            </ActivityCardFrame>
        }
        .into_view(),
        Some(Ok(list)) if list.is_empty() => view! {
            <ActivityCardFrame>
                <div class="text-center p-4">
                    <p class="text-3xl text-status-info-text mb-3" aria-hidden="true">"ℹ"</p>
                    <p class="text-fg-muted">"Nenhuma atividade registrada para este produto"</p>
                </div>
            </ActivityCardFrame>
        }
        .into_view(),
        Some(Ok(list)) => view! {
            <ActivityCardFrame>
                <h3 class="text-xl font-semibold mb-4 flex items-center gap-2 text-fg">
                    <span aria-hidden="true">"🕘"</span>
                    "Histórico de Atividades"
                </h3>
                <ol class="relative">
                    {list
                        .into_iter()
                        .map(|activity| view! { <ActivityEntry activity=activity/> })
                        .collect_view()}
                </ol>
            </ActivityCardFrame>
        }
        .into_view(),
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_timeline_entries() {
        let html = render_to_string(|| {
            let list: Vec<ActivityLog> =
                serde_json::from_value(crate::api::test_support::activity_json()["data"].clone())
                    .unwrap_or_default();
            view! { <ProductActivityLog activities=Signal::derive(move || Some(Ok(list.clone())))/> }
        });
        assert!(html.contains("Histórico de Atividades"));
        assert!(html.contains("CREATED"));
        assert!(html.contains("por Admin"));
        assert!(html.contains("por Sistema"));
        assert!(html.contains("Preço alterado de R$ 10.00 para R$ 12.50"));
    }

    #[test]
    fn renders_empty_and_error_states() {
        let empty = render_to_string(|| {
            view! { <ProductActivityLog activities=Signal::derive(|| Some(Ok(Vec::new())))/> }
        });
        assert!(empty.contains("Nenhuma atividade registrada para este produto"));

        let failed = render_to_string(|| {
            view! { <ProductActivityLog activities=Signal::derive(|| Some(Err(ApiError::unknown("x"))))/> }
        });
        assert!(failed.contains("Erro ao carregar histórico de atividades"));

        let loading = render_to_string(|| view! { <ProductActivityLog activities=Signal::derive(|| None)/> });
        assert!(loading.contains("Carregando histórico..."));
    }
}
