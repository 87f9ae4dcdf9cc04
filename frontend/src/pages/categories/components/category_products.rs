use crate::{
    api::Product,
    components::{cached_image::CachedImage, common::Spinner, empty_state::EmptyState},
    pages::categories::view_model::CategoriesViewModel,
    router::paths,
    utils::format::{format_currency, truncate_text},
};
use leptos::*;

pub const CARD_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/200x200?text=No+Image";

#[component]
pub fn CategoryProducts(vm: CategoriesViewModel, #[prop(into)] category: String) -> impl IntoView {
    let resource = vm.products_in(category.clone());
    let products = Signal::derive(move || resource.get().map(|r| r.unwrap_or_default()));
    view! {
        <div class="p-3">
            <h5 class="mb-3 flex items-center gap-2 text-base font-semibold text-fg">
                <span class="text-action-primary-bg" aria-hidden="true">"🏷"</span>
                {format!("Produtos da categoria \"{}\"", category)}
                <span class="ml-2 rounded-full bg-surface-muted px-2 py-0.5 text-xs text-fg-muted">
                    {move || format!("{} produtos", products.with(|p| p.as_ref().map_or(0, Vec::len)))}
                </span>
            </h5>
            <CategoryProductsBody products=products/>
        </div>
    }
}

#[component]
pub fn CategoryProductsBody(products: Signal<Option<Vec<Product>>>) -> impl IntoView {
    move || match products.get() {
        None => view! {
            <div class="text-center p-4">
                <Spinner class="h-8 w-8 mx-auto"/>
                <p class="mt-2 text-sm text-fg-muted">"Carregando produtos..."</p>
            </div>
        }
        .into_view(),
        Some(list) if list.is_empty() => view! {
            <EmptyState
                title="Nenhum produto encontrado nesta categoria"
                icon=view! { <span class="text-4xl" aria-hidden="true">"📥"</span> }.into_view()
            />
        }
        .into_view(),
        Some(list) => view! {
            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4">
                {list.into_iter().map(|product| view! { <ProductCard product=product/> }).collect_view()}
            </div>
        }
        .into_view(),
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    view! {
        <a
            href=paths::product_detail(product.id)
            class="flex h-full flex-col rounded-lg border border-border bg-surface-elevated p-3 shadow-sm hover:shadow-md"
        >
            <div class="flex h-40 items-center justify-center">
                <CachedImage
                    src=product.image_url.clone()
                    alt=product.title.clone()
                    class="max-h-40 object-contain"
                    height="160"
                    fallback=CARD_IMAGE_PLACEHOLDER
                />
            </div>
            <h6 class="mt-3 text-sm font-semibold text-fg" title=product.title.clone()>
                {truncate_text(&product.title, 60)}
            </h6>
            <div class="mt-1 text-lg font-bold text-action-primary-bg">{format_currency(product.price_value())}</div>
            <div class="mt-auto flex items-center gap-1 text-xs text-fg-muted">
                <span aria-hidden="true">"🏷"</span>
                <span>{product.category.name.clone()}</span>
            </div>
        </a>
    }
}
