use super::repository::StatsRepository;
use crate::{
    api::{ApiClient, ApiError, Product, Stats},
    state::query::{use_query_client, QueryScope},
    utils::chart::{with_palette, ChartItem},
};
use leptos::*;
use std::rc::Rc;

/// One doughnut slice per category, palette colours in server order.
pub fn category_chart(stats: &Stats) -> Vec<ChartItem> {
    with_palette(
        stats
            .by_category
            .iter()
            .map(|c| (c.category.clone(), c.total as f64))
            .collect(),
    )
}

pub fn most_expensive(stats: &Stats) -> Vec<Product> {
    stats.top5_expensive.iter().cloned().map(Product::from).collect()
}

#[derive(Clone, Copy)]
pub struct StatsViewModel {
    pub stats_resource: Resource<u64, Result<Stats, ApiError>>,
    pub cheapest_resource: Resource<u64, Result<Vec<Product>, ApiError>>,
}

impl StatsViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let queries = use_query_client();
        let repository = store_value(StatsRepository::new_with_client(
            Rc::new(api),
            queries.clone(),
        ));

        let stats_queries = queries.clone();
        let stats_resource = create_resource(
            move || stats_queries.revision(QueryScope::Stats),
            move |_| {
                let repo = repository.get_value();
                async move { repo.fetch_stats().await }
            },
        );
        let cheapest_resource = create_resource(
            move || queries.revision(QueryScope::Products),
            move |_| {
                let repo = repository.get_value();
                async move { repo.fetch_cheapest().await }
            },
        );

        Self {
            stats_resource,
            cheapest_resource,
        }
    }

    /// Cheapest products; empty while loading or on failure.
    pub fn cheapest(&self) -> Signal<Vec<Product>> {
        let resource = self.cheapest_resource;
        Signal::derive(move || resource.get().and_then(Result::ok).unwrap_or_default())
    }

    pub fn cheapest_loading(&self) -> Signal<bool> {
        let resource = self.cheapest_resource;
        Signal::derive(move || resource.loading().get())
    }
}

pub fn use_stats_view_model() -> StatsViewModel {
    match use_context::<StatsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = StatsViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
