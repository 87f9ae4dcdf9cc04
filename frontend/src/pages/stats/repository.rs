use crate::api::{ApiClient, ApiError, Product, Stats};
use crate::state::query::{QueryClient, QueryKey};
use std::rc::Rc;

#[derive(Clone)]
pub struct StatsRepository {
    client: Rc<ApiClient>,
    queries: QueryClient,
}

impl StatsRepository {
    pub fn new_with_client(client: Rc<ApiClient>, queries: QueryClient) -> Self {
        Self { client, queries }
    }

    pub async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        let client = self.client.clone();
        self.queries
            .fetch(QueryKey::Stats, || async move { client.get_stats().await })
            .await
    }

    pub async fn fetch_cheapest(&self) -> Result<Vec<Product>, ApiError> {
        let client = self.client.clone();
        self.queries
            .fetch(QueryKey::CheapestProducts, || async move {
                client.list_cheapest_products().await
            })
            .await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::{client_for, product_json, products_page_json, stats_json};
    use crate::state::query::QueryScope;
    use httpmock::prelude::*;
    use leptos::create_runtime;

    #[tokio::test]
    async fn stats_are_refetched_after_invalidation() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/catalogo/stats");
                then.status(200).json_body(stats_json());
            })
            .await;
        let queries = QueryClient::new();
        let repo = StatsRepository::new_with_client(Rc::new(client_for(&server)), queries.clone());

        let stats = repo.fetch_stats().await.unwrap();
        repo.fetch_stats().await.unwrap();
        queries.invalidate(QueryScope::Stats);
        repo.fetch_stats().await.unwrap();

        assert_eq!(stats.total_products, 10);
        assert_eq!(stats.by_category.len(), 2);
        mock.assert_hits_async(2).await;
        runtime.dispose();
    }

    #[tokio::test]
    async fn cheapest_asks_for_five_by_ascending_price() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/catalogo/products")
                    .query_param("sort", "price")
                    .query_param("order", "asc")
                    .query_param("per_page", "5");
                then.status(200).json_body(products_page_json(
                    vec![product_json(8, "Socks", "1.50", "men's clothing")],
                    1,
                    5,
                    1,
                ));
            })
            .await;
        let repo = StatsRepository::new_with_client(
            Rc::new(client_for(&server)),
            QueryClient::new(),
        );

        let cheapest = repo.fetch_cheapest().await.unwrap();

        assert_eq!(cheapest[0].title, "Socks");
        mock.assert_hits_async(1).await;
        runtime.dispose();
    }
}
