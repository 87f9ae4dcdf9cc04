use super::{components::table::CategoriesTable, view_model::use_categories_view_model};
use crate::components::layout::{ErrorMessage, LoadingSpinner};
use leptos::*;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let vm = use_categories_view_model();
    let error = vm.error();

    let body = move || {
        if let Some(err) = error.get() {
            log::error!("Failed to load categories: {}", err);
            return view! { <ErrorMessage message="Erro ao carregar categorias"/> }.into_view();
        }
        if vm.categories_resource.get().is_none() {
            return view! {
                <div class="flex justify-center items-center h-[50vh]">
                    <LoadingSpinner/>
                </div>
            }
            .into_view();
        }
        view! { <CategoriesTable vm=vm/> }.into_view()
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Categorias"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Visualize todas as categorias de produtos disponíveis"</p>
            </div>
            {body}
        </div>
    }
}
