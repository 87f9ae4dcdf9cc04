use super::{
    repository::CategoriesRepository,
    utils::{
        next_category_sort, visible_categories, CategoryRowFilters, CategorySortField,
        CATEGORIES_PER_PAGE,
    },
};
use crate::{
    api::{ApiClient, ApiError, Category, Product, SortOrder},
    config,
    state::query::{use_query_client, QueryClient, QueryScope},
    utils::pagination::paginate_slice,
};
use leptos::*;
use std::{collections::HashSet, rc::Rc};

#[derive(Clone, Copy)]
pub struct CategoriesViewModel {
    pub categories_resource: Resource<u64, Result<Vec<Category>, ApiError>>,
    pub row_filters: RwSignal<CategoryRowFilters>,
    pub sort: RwSignal<Option<(CategorySortField, SortOrder)>>,
    pub page: RwSignal<u32>,
    pub expanded: RwSignal<HashSet<i64>>,
    repository: StoredValue<CategoriesRepository>,
    queries: StoredValue<QueryClient>,
}

impl CategoriesViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let queries = use_query_client();
        let repository = store_value(CategoriesRepository::new_with_client(
            Rc::new(api),
            queries.clone(),
        ));

        let revision_source = queries.clone();
        let categories_resource = create_resource(
            move || revision_source.revision(QueryScope::Categories),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list_categories().await }
            },
        );

        Self {
            categories_resource,
            row_filters: create_rw_signal(CategoryRowFilters::default()),
            sort: create_rw_signal(None),
            page: create_rw_signal(1),
            expanded: create_rw_signal(HashSet::new()),
            repository,
            queries: store_value(queries),
        }
    }

    pub fn error(&self) -> Signal<Option<ApiError>> {
        let resource = self.categories_resource;
        Signal::derive(move || resource.get().and_then(Result::err))
    }

    /// Every category once loaded, before row filters.
    pub fn all(&self) -> Signal<Option<Vec<Category>>> {
        let resource = self.categories_resource;
        Signal::derive(move || resource.get().and_then(Result::ok))
    }

    pub fn visible(&self) -> Signal<Vec<Category>> {
        let all = self.all();
        let filters = self.row_filters;
        let sort = self.sort;
        Signal::derive(move || {
            all.with(|all| {
                all.as_deref()
                    .map(|all| {
                        filters.with(|f| {
                            visible_categories(all, f, sort.get(), config::time_zone())
                        })
                    })
                    .unwrap_or_default()
            })
        })
    }

    pub fn page_rows(&self) -> Signal<Vec<Category>> {
        let visible = self.visible();
        let page = self.page;
        Signal::derive(move || {
            visible.with(|rows| paginate_slice(rows, page.get(), CATEGORIES_PER_PAGE))
        })
    }

    /// Any filter edit goes back to the first page.
    pub fn update_filters(&self, update: impl FnOnce(&mut CategoryRowFilters)) {
        self.row_filters.update(update);
        self.page.set(1);
    }

    pub fn toggle_sort(&self, field: CategorySortField) {
        let next = next_category_sort(self.sort.get_untracked(), field);
        self.sort.set(Some(next));
    }

    pub fn toggle_expanded(&self, id: i64) {
        self.expanded.update(|ids| {
            if !ids.remove(&id) {
                ids.insert(id);
            }
        });
    }

    /// Products of one category, owned by the calling component.
    pub fn products_in(&self, category: String) -> Resource<u64, Result<Vec<Product>, ApiError>> {
        let repository = self.repository;
        let queries = self.queries.get_value();
        create_resource(
            move || queries.revision(QueryScope::Products),
            move |_| {
                let repo = repository.get_value();
                let category = category.clone();
                async move { repo.list_products_in(&category).await }
            },
        )
    }
}

pub fn use_categories_view_model() -> CategoriesViewModel {
    match use_context::<CategoriesViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = CategoriesViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
