use super::view_model::{parse_product_id, use_product_detail_view_model};
use crate::{
    api::{ActivityLog, ApiError, Product},
    components::{
        activity_log::ProductActivityLog,
        common::{Spinner, Tag},
        layout::LoadingSpinner,
    },
    router::paths,
    utils::format::format_price,
};
use leptos::*;
use leptos_router::use_params_map;

pub const DETAIL_IMAGE_PLACEHOLDER: &str =
    "https://via.placeholder.com/400x400?text=Imagem+Indispon%C3%ADvel";

const BACK_LINK_CLASS: &str = "inline-flex items-center gap-2 rounded-md border border-border-strong px-4 py-2 text-sm font-semibold text-fg-muted hover:bg-surface-muted";

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let params = use_params_map();
    let product_id = Signal::derive(move || {
        params.with(|params| params.get("id").and_then(|id| parse_product_id(id)))
    });
    view! { <ProductDetailPanel product_id=product_id/> }
}

#[component]
pub fn ProductDetailPanel(product_id: Signal<Option<i64>>) -> impl IntoView {
    let vm = use_product_detail_view_model(product_id);
    let activities = vm.activities();

    move || match vm.product_resource.get() {
        None => view! {
            <div class="bg-surface-elevated shadow rounded-lg p-6">
                <LoadingSpinner label="Carregando produto..."/>
            </div>
        }
        .into_view(),
        Some(Err(err)) => {
            log::warn!("Product {:?} unavailable: {}", product_id.get_untracked(), err);
            view! { <ProductNotFound/> }.into_view()
        }
        Some(Ok(product)) => view! {
            <ProductDetailContent product=product activities=activities/>
        }
        .into_view(),
    }
}

#[component]
pub fn ProductNotFound() -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 text-center">
            <p class="text-4xl text-status-error-text mb-3" aria-hidden="true">"⚠"</p>
            <h3 class="text-lg font-semibold text-fg">"Produto não encontrado"</h3>
            <p class="text-fg-muted mb-4">"O produto solicitado não foi encontrado."</p>
            <a href=paths::PRODUCTS class=BACK_LINK_CLASS>
                "Voltar aos Produtos" <span aria-hidden="true">"←"</span>
            </a>
        </div>
    }
}

#[component]
fn ProductImage(#[prop(into)] src: String, #[prop(into)] alt: String) -> impl IntoView {
    let loading = create_rw_signal(true);
    let failed = create_rw_signal(false);
    let src = store_value(src);
    let current_src = move || {
        if failed.get() {
            DETAIL_IMAGE_PLACEHOLDER.to_string()
        } else {
            src.get_value()
        }
    };

    view! {
        <div class="relative flex items-center justify-center min-h-[300px]">
            <Show when=move || loading.get() && !failed.get()>
                <div class="absolute inset-0 flex flex-col items-center justify-center bg-surface-elevated">
                    <Spinner class="h-8 w-8"/>
                    <p class="mt-2 text-sm text-fg-muted">"Carregando imagem..."</p>
                </div>
            </Show>
            <img
                src=current_src
                alt=alt
                class=move || {
                    if loading.get() {
                        "max-h-96 object-contain opacity-0"
                    } else {
                        "max-h-96 object-contain"
                    }
                }
                on:load=move |_| loading.set(false)
                on:error=move |_| {
                    failed.set(true);
                    loading.set(false);
                }
            />
        </div>
    }
}

#[component]
pub fn ProductDetailContent(
    product: Product,
    activities: Signal<Option<Result<Vec<ActivityLog>, ApiError>>>,
) -> impl IntoView {
    let category = product.category.name.clone();
    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <a href=paths::PRODUCTS class=BACK_LINK_CLASS>
                    "Voltar" <span aria-hidden="true">"←"</span>
                </a>
            </div>
            <div class="grid grid-cols-1 gap-6 md:grid-cols-3">
                <div class="bg-surface-elevated shadow rounded-lg p-4">
                    <ProductImage src=product.image_url.clone() alt=product.title.clone()/>
                </div>
                <div class="bg-surface-elevated shadow rounded-lg p-6 md:col-span-2 space-y-4">
                    <div>
                        <Tag value=category.clone()/>
                        <h1 class="mt-2 text-3xl font-bold text-fg">{product.title.clone()}</h1>
                    </div>
                    <p class="text-4xl font-bold text-action-primary-bg">{format_price(&product.price)}</p>
                    <div>
                        <h3 class="text-xl font-semibold text-fg mb-2">"Descrição"</h3>
                        <p class="text-fg-muted leading-relaxed">{product.description.clone()}</p>
                    </div>
                    <div class="max-w-sm rounded-md border border-border p-3">
                        <h4 class="font-semibold text-fg mb-2">"Informações do Produto"</h4>
                        <div class="flex justify-between mb-2">
                            <span>"ID:"</span>
                            <span class="font-semibold">{format!("#{}", product.id)}</span>
                        </div>
                        <div class="flex justify-between">
                            <span>"Categoria:"</span>
                            <span class="font-semibold">{category}</span>
                        </div>
                    </div>
                </div>
            </div>
            <ProductActivityLog activities=activities/>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::{activity_json, product_json};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn shows_loading_until_product_arrives() {
        let html = render_to_string(|| {
            view! { <ProductDetailPanel product_id=Signal::derive(|| Some(3))/> }
        });
        assert!(html.contains("Carregando produto..."));
    }

    #[test]
    fn not_found_links_back_to_list() {
        let html = render_to_string(|| view! { <ProductNotFound/> });
        assert!(html.contains("Produto não encontrado"));
        assert!(html.contains("O produto solicitado não foi encontrado."));
        assert!(html.contains("href=\"/products\""));
        assert!(html.contains("Voltar aos Produtos"));
    }

    #[test]
    fn content_renders_product_info_and_activity() {
        let html = render_to_string(|| {
            let product: Product =
                serde_json::from_value(product_json(9, "Gold Ring", "168", "jewelery")).unwrap();
            let log: Vec<ActivityLog> =
                serde_json::from_value(activity_json()["data"].clone()).unwrap();
            view! {
                <ProductDetailContent
                    product=product
                    activities=Signal::derive(move || Some(Ok(log.clone())))
                />
            }
        });
        assert!(html.contains("Gold Ring"));
        assert!(html.contains("jewelery"));
        assert!(html.contains("#9"));
        assert!(html.contains("Descrição"));
        assert!(html.contains("Informações do Produto"));
        assert!(html.contains("Carregando imagem..."));
        assert!(html.contains("por Admin"));
    }
}
