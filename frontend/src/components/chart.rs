use leptos::*;

use crate::utils::chart::{segments, ChartItem, Geometry};

pub const CHART_SIZE: f64 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Doughnut,
    Pie,
}

/// SVG pie or doughnut with a legend; each slice carries a `<title>` tooltip.
#[component]
pub fn DoughnutChart(
    #[prop(into)] items: Signal<Vec<ChartItem>>,
    #[prop(optional)] kind: ChartKind,
    #[prop(default = "Sem dados para exibir".to_string(), into)] empty_message: String,
) -> impl IntoView {
    let geometry = match kind {
        ChartKind::Doughnut => Geometry::doughnut(CHART_SIZE),
        ChartKind::Pie => Geometry::pie(CHART_SIZE),
    };
    let segments = Signal::derive(move || items.with(|items| segments(items, geometry)));
    let view_box = format!("0 0 {0} {0}", CHART_SIZE);

    move || {
        let current = segments.get();
        if current.is_empty() {
            return view! { <p class="py-8 text-center text-sm text-fg-muted">{empty_message.clone()}</p> }
                .into_view();
        }
        let legend = current.clone();
        view! {
            <div class="flex flex-col items-center gap-4">
                <svg
                    viewBox=view_box.clone()
                    class="h-64 w-64"
                    role="img"
                >
                    {current
                        .into_iter()
                        .map(|segment| {
                            let tooltip = segment.tooltip();
                            view! {
                                <path d=segment.path fill=segment.color stroke="white" stroke-width="1">
                                    <title>{tooltip}</title>
                                </path>
                            }
                        })
                        .collect_view()}
                </svg>
                <ul class="flex flex-wrap justify-center gap-3 text-sm text-fg">
                    {legend
                        .into_iter()
                        .map(|segment| view! {
                            <li class="flex items-center gap-2">
                                <span class="inline-block h-3 w-3 rounded-sm" style=format!("background-color: {}", segment.color)></span>
                                {segment.label}
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        }
        .into_view()
    }
}
