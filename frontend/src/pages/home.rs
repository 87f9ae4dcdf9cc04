use crate::{components::cards::ActionCard, router::paths};
use leptos::*;

struct QuickAction {
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    accent: &'static str,
    href: &'static str,
}

const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        title: "Ver Produtos",
        description: "Navegar pelo catálogo de produtos",
        icon: "🛒",
        accent: "bg-blue-500",
        href: paths::PRODUCTS,
    },
    QuickAction {
        title: "Dashboard",
        description: "Visualizar estatísticas e métricas",
        icon: "◔",
        accent: "bg-green-500",
        href: paths::STATS,
    },
    QuickAction {
        title: "Sincronização",
        description: "Sincronizar dados com Fake Store API",
        icon: "⟳",
        accent: "bg-orange-500",
        href: paths::SYNC,
    },
];

const FRONTEND_TAGS: [(&str, &str); 5] = [
    ("Leptos 0.6", "bg-blue-100 text-blue-800"),
    ("Rust", "bg-green-100 text-green-800"),
    ("WebAssembly", "bg-purple-100 text-purple-800"),
    ("Trunk", "bg-orange-100 text-orange-800"),
    ("Tailwind", "bg-red-100 text-red-800"),
];

const BACKEND_TAGS: [(&str, &str); 5] = [
    ("Laravel 10", "bg-red-100 text-red-800"),
    ("PHP 8.1+", "bg-blue-100 text-blue-800"),
    ("MySQL", "bg-green-100 text-green-800"),
    ("Eloquent ORM", "bg-yellow-100 text-yellow-800"),
    ("Spatie ActivityLog", "bg-indigo-100 text-indigo-800"),
];

#[component]
fn AboutColumn(
    title: &'static str,
    text: &'static str,
    tags: &'static [(&'static str, &'static str)],
) -> impl IntoView {
    view! {
        <div>
            <h3 class="text-xl font-semibold mb-3 text-fg">{title}</h3>
            <p class="text-fg-muted mb-3 leading-relaxed">{text}</p>
            <div class="flex flex-wrap gap-2 mb-3">
                {tags
                    .iter()
                    .map(|(label, colors)| view! {
                        <span class=format!("{} px-3 py-2 rounded text-sm font-medium", colors)>{*label}</span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Bem-vindo ao Fake Store Integration"</h1>
                <p class="mt-1 text-sm text-fg-muted">
                    "Sistema de integração e gerenciamento de produtos da Fake Store API"
                </p>
            </div>
            <div class="grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3">
                {QUICK_ACTIONS
                    .iter()
                    .map(|action| view! {
                        <ActionCard
                            title=action.title
                            description=action.description
                            icon=action.icon
                            href=action.href
                            accent=action.accent
                        />
                    })
                    .collect_view()}
            </div>
            <div class="bg-surface-elevated shadow rounded-lg border border-border p-6">
                <div class="grid grid-cols-1 gap-6 md:grid-cols-2">
                    <AboutColumn
                        title="Sobre o Front-End"
                        text="Interface desenvolvida em Rust com Leptos e compilada para WebAssembly, oferecendo experiência de usuário intuitiva e responsiva."
                        tags=&FRONTEND_TAGS
                    />
                    <AboutColumn
                        title="Sobre o Back-End"
                        text="API robusta desenvolvida em Laravel com arquitetura limpa, integração externa e tratamento avançado de erros."
                        tags=&BACKEND_TAGS
                    />
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn home_links_to_main_sections() {
        let html = render_to_string(|| view! { <HomePage/> });
        assert!(html.contains("Bem-vindo ao Fake Store Integration"));
        assert!(html.contains("href=\"/products\""));
        assert!(html.contains("href=\"/stats\""));
        assert!(html.contains("href=\"/sync\""));
        assert!(html.contains("Visualizar estatísticas e métricas"));
        assert!(html.contains("Sobre o Front-End"));
        assert!(html.contains("Sobre o Back-End"));
    }
}
