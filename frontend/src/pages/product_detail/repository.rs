use crate::api::{ActivityLog, ApiClient, ApiError, Product};
use crate::state::query::{QueryClient, QueryKey};
use std::rc::Rc;

#[derive(Clone)]
pub struct ProductDetailRepository {
    client: Rc<ApiClient>,
    queries: QueryClient,
}

impl ProductDetailRepository {
    pub fn new_with_client(client: Rc<ApiClient>, queries: QueryClient) -> Self {
        Self { client, queries }
    }

    pub async fn fetch_product(&self, id: i64) -> Result<Product, ApiError> {
        let client = self.client.clone();
        self.queries
            .fetch(QueryKey::Product(id), || async move { client.get_product(id).await })
            .await
    }

    pub async fn fetch_activity(&self, id: i64) -> Result<Vec<ActivityLog>, ApiError> {
        let client = self.client.clone();
        self.queries
            .fetch(QueryKey::ProductActivity(id), || async move {
                client.get_product_activity(id).await
            })
            .await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::{activity_json, client_for, product_json};
    use httpmock::prelude::*;
    use leptos::create_runtime;
    use serde_json::json;

    #[tokio::test]
    async fn product_and_activity_are_unwrapped() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/catalogo/products/7");
                then.status(200)
                    .json_body(json!({ "data": product_json(7, "Ring", "9.99", "jewelery") }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/catalogo/products/7/activity");
                then.status(200).json_body(activity_json());
            })
            .await;
        let repo = ProductDetailRepository::new_with_client(
            Rc::new(client_for(&server)),
            QueryClient::new(),
        );

        let product = repo.fetch_product(7).await.unwrap();
        let activity = repo.fetch_activity(7).await.unwrap();

        assert_eq!(product.category.name, "jewelery");
        assert_eq!(activity.len(), 2);
        runtime.dispose();
    }

    #[tokio::test]
    async fn missing_product_is_an_error() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/catalogo/products/99");
                then.status(404).json_body(json!({ "error": "Produto não encontrado" }));
            })
            .await;
        let repo = ProductDetailRepository::new_with_client(
            Rc::new(client_for(&server)),
            QueryClient::new(),
        );

        let err = repo.fetch_product(99).await.unwrap_err();

        assert_eq!(err.status, Some(404));
        assert_eq!(err.error, "Produto não encontrado");
        runtime.dispose();
    }
}
