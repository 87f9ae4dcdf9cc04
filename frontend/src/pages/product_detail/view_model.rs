use super::repository::ProductDetailRepository;
use crate::{
    api::{ActivityLog, ApiClient, ApiError, Product},
    state::query::{use_query_client, QueryScope},
};
use leptos::*;
use std::rc::Rc;

/// Route parameter to product id; anything but a positive integer is rejected.
pub fn parse_product_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

fn invalid_id() -> ApiError {
    ApiError::validation("Produto inválido")
}

#[derive(Clone, Copy)]
pub struct ProductDetailViewModel {
    pub product_id: Signal<Option<i64>>,
    pub product_resource: Resource<(Option<i64>, u64), Result<Product, ApiError>>,
    pub activity_resource: Resource<(Option<i64>, u64), Result<Vec<ActivityLog>, ApiError>>,
}

impl ProductDetailViewModel {
    pub fn new(product_id: Signal<Option<i64>>) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let queries = use_query_client();
        let repository = store_value(ProductDetailRepository::new_with_client(
            Rc::new(api),
            queries.clone(),
        ));

        let product_queries = queries.clone();
        let product_resource = create_resource(
            move || (product_id.get(), product_queries.revision(QueryScope::Product)),
            move |(id, _)| {
                let repo = repository.get_value();
                async move {
                    match id {
                        Some(id) => repo.fetch_product(id).await,
                        None => Err(invalid_id()),
                    }
                }
            },
        );

        let activity_resource = create_resource(
            move || (product_id.get(), queries.revision(QueryScope::Activity)),
            move |(id, _)| {
                let repo = repository.get_value();
                async move {
                    match id {
                        Some(id) => repo.fetch_activity(id).await,
                        None => Err(invalid_id()),
                    }
                }
            },
        );

        Self {
            product_id,
            product_resource,
            activity_resource,
        }
    }

    pub fn activities(&self) -> Signal<Option<Result<Vec<ActivityLog>, ApiError>>> {
        let resource = self.activity_resource;
        Signal::derive(move || resource.get())
    }
}

pub fn use_product_detail_view_model(product_id: Signal<Option<i64>>) -> ProductDetailViewModel {
    match use_context::<ProductDetailViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = ProductDetailViewModel::new(product_id);
            provide_context(vm);
            vm
        }
    }
}
