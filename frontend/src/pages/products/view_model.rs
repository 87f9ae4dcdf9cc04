use super::repository::ProductsRepository;
use crate::{
    api::{ApiClient, ApiError, Product, ProductFilters, ProductsPage, SortField, SortOrder},
    router::paths,
    state::query::{use_query_client, QueryScope},
    utils::query::{href_with_filters, parse_filters},
};
use leptos::*;
use std::rc::Rc;

/// Filters for a querystring: first page of 20 unless the URL says otherwise.
pub fn filters_from_search(search: &str) -> ProductFilters {
    ProductFilters::first_page().merged_with(parse_filters(search))
}

pub fn with_page(filters: &ProductFilters, page: u32, per_page: u32) -> ProductFilters {
    ProductFilters {
        page: Some(page),
        per_page: Some(per_page),
        ..filters.clone()
    }
}

pub fn with_sort(filters: &ProductFilters, field: SortField, order: SortOrder) -> ProductFilters {
    ProductFilters {
        sort: Some(field),
        order: Some(order),
        page: Some(1),
        ..filters.clone()
    }
}

/// Distinct category names on the current page, used when the categories
/// endpoint is unavailable.
pub fn categories_on_page(products: &[Product]) -> Vec<String> {
    let mut names: Vec<String> = products.iter().map(|p| p.category.name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

#[derive(Clone, Copy)]
pub struct ProductsViewModel {
    pub filters: Memo<ProductFilters>,
    pub products_resource: Resource<(ProductFilters, u64), Result<ProductsPage, ApiError>>,
    pub categories_resource: Resource<u64, Result<Vec<String>, ApiError>>,
    pub show_filters: RwSignal<bool>,
    on_navigate: Callback<String>,
}

impl ProductsViewModel {
    pub fn new(search: Signal<String>, on_navigate: Callback<String>) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let queries = use_query_client();
        let repository = store_value(ProductsRepository::new_with_client(
            Rc::new(api),
            queries.clone(),
        ));

        let filters = create_memo(move |_| filters_from_search(&search.get()));

        let products_queries = queries.clone();
        let products_resource = create_resource(
            move || (filters.get(), products_queries.revision(QueryScope::Products)),
            move |(filters, _)| {
                let repo = repository.get_value();
                async move { repo.list_products(&filters).await }
            },
        );

        let categories_resource = create_resource(
            move || queries.revision(QueryScope::Categories),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list_category_names().await }
            },
        );

        Self {
            filters,
            products_resource,
            categories_resource,
            show_filters: create_rw_signal(false),
            on_navigate,
        }
    }

    pub fn page(&self) -> Signal<Option<ProductsPage>> {
        let resource = self.products_resource;
        Signal::derive(move || resource.get().and_then(Result::ok))
    }

    pub fn error(&self) -> Signal<Option<ApiError>> {
        let resource = self.products_resource;
        Signal::derive(move || resource.get().and_then(Result::err))
    }

    pub fn available_categories(&self) -> Signal<Vec<String>> {
        let categories = self.categories_resource;
        let page = self.page();
        Signal::derive(move || match categories.get() {
            Some(Ok(names)) if !names.is_empty() => names,
            _ => page
                .get()
                .map(|p| categories_on_page(&p.data))
                .unwrap_or_default(),
        })
    }

    fn navigate_to(&self, filters: &ProductFilters) {
        self.on_navigate
            .call(href_with_filters(paths::PRODUCTS, filters));
    }

    pub fn apply_filters(&self, filters: ProductFilters) {
        self.navigate_to(&filters);
    }

    pub fn change_page(&self, page: u32, per_page: u32) {
        let next = with_page(&self.filters.get_untracked(), page, per_page);
        self.navigate_to(&next);
    }

    pub fn change_sort(&self, field: SortField, order: SortOrder) {
        let next = with_sort(&self.filters.get_untracked(), field, order);
        self.navigate_to(&next);
    }
}

pub fn use_products_view_model(
    search: Signal<String>,
    on_navigate: Callback<String>,
) -> ProductsViewModel {
    match use_context::<ProductsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = ProductsViewModel::new(search, on_navigate);
            provide_context(vm);
            vm
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProductCategory;

    #[test]
    fn url_overrides_default_pagination() {
        let filters = filters_from_search("?page=3&q=bag");
        assert_eq!(filters.page, Some(3));
        assert_eq!(filters.per_page, Some(20));
        assert_eq!(filters.q.as_deref(), Some("bag"));
    }

    #[test]
    fn sorting_returns_to_first_page() {
        let filters = ProductFilters {
            page: Some(5),
            ..ProductFilters::first_page()
        };
        let sorted = with_sort(&filters, SortField::Price, SortOrder::Desc);
        assert_eq!(sorted.page, Some(1));
        assert_eq!(sorted.sort, Some(SortField::Price));
        assert_eq!(sorted.order, Some(SortOrder::Desc));
    }

    #[test]
    fn paging_keeps_other_filters() {
        let filters = ProductFilters {
            categories: vec!["electronics".into()],
            ..ProductFilters::first_page()
        };
        let next = with_page(&filters, 2, 50);
        assert_eq!(next.page, Some(2));
        assert_eq!(next.per_page, Some(50));
        assert_eq!(next.categories, vec!["electronics"]);
    }

    #[test]
    fn page_categories_are_unique_and_sorted() {
        let product = |id, category: &str| Product {
            id,
            title: format!("p{}", id),
            price: "1".into(),
            description: String::new(),
            category: ProductCategory {
                id: 1,
                name: category.into(),
            },
            image_url: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let names = categories_on_page(&[
            product(1, "jewelery"),
            product(2, "electronics"),
            product(3, "jewelery"),
        ]);
        assert_eq!(names, vec!["electronics", "jewelery"]);
    }
}
