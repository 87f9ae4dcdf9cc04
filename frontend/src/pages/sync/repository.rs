use crate::api::{ApiClient, ApiError, SyncRequest, SyncResponse};
use crate::state::query::{QueryClient, QueryScope};
use crate::utils::image_cache::clear_shared_cache;
use std::rc::Rc;

#[derive(Clone)]
pub struct SyncRepository {
    client: Rc<ApiClient>,
    queries: QueryClient,
}

impl SyncRepository {
    pub fn new_with_client(client: Rc<ApiClient>, queries: QueryClient) -> Self {
        Self { client, queries }
    }

    /// Runs one import; product and stats queries refetch afterwards.
    pub async fn sync(&self, request: SyncRequest) -> Result<SyncResponse, ApiError> {
        let response = self.client.sync(&request).await?;
        self.queries.invalidate(QueryScope::Products);
        self.queries.invalidate(QueryScope::Stats);
        Ok(response)
    }

    /// Deletes the whole catalog and forgets every cached query.
    pub async fn delete_all(&self) -> Result<(), ApiError> {
        self.client.delete_all_products().await?;
        self.queries.clear();
        Ok(())
    }

    pub fn clear_image_cache(&self) {
        clear_shared_cache();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::{client_for, stats_json, sync_json};
    use crate::api::SyncMode;
    use crate::state::query::QueryKey;
    use httpmock::prelude::*;
    use leptos::create_runtime;
    use serde_json::json;

    #[tokio::test]
    async fn sync_invalidates_products_and_stats() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/integracoes/fakestore/sync")
                    .query_param("mode", "limited")
                    .query_param("limit", "5");
                then.status(200).json_body(sync_json("limited"));
            })
            .await;
        let stats_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/catalogo/stats");
                then.status(200).json_body(stats_json());
            })
            .await;
        let client = Rc::new(client_for(&server));
        let queries = QueryClient::new();
        let repo = SyncRepository::new_with_client(client.clone(), queries.clone());
        let stats = || {
            let client = client.clone();
            let queries = queries.clone();
            async move {
                queries
                    .fetch(QueryKey::Stats, || async move { client.get_stats().await })
                    .await
            }
        };

        stats().await.unwrap();
        let response = repo
            .sync(SyncRequest::new(SyncMode::Limited, Some(5)))
            .await
            .unwrap();
        stats().await.unwrap();

        assert_eq!(response.result.imported, 3);
        assert_eq!(response.limit, Some(5));
        stats_mock.assert_hits_async(2).await;
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_sync_is_not_retried() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/integracoes/fakestore/sync");
                then.status(500).json_body(json!({ "error": "Falha ao contatar Fake Store" }));
            })
            .await;
        let repo = SyncRepository::new_with_client(
            Rc::new(client_for(&server)),
            QueryClient::new(),
        );

        let err = repo.sync(SyncRequest::new(SyncMode::Full, None)).await.unwrap_err();

        assert_eq!(err.status, Some(500));
        mock.assert_hits_async(1).await;
        runtime.dispose();
    }

    #[tokio::test]
    async fn delete_all_clears_cached_queries() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/catalogo/products/all");
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;
        let queries = QueryClient::new();
        queries
            .fetch(QueryKey::Categories, || async { Ok(Vec::<String>::new()) })
            .await
            .unwrap();
        assert_eq!(queries.cached_len(), 1);
        let repo = SyncRepository::new_with_client(Rc::new(client_for(&server)), queries.clone());

        repo.delete_all().await.unwrap();

        assert_eq!(queries.cached_len(), 0);
        runtime.dispose();
    }
}
