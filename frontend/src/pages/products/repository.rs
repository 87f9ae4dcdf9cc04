use crate::api::{ApiClient, ApiError, ProductFilters, ProductsPage};
use crate::state::query::{QueryClient, QueryKey};
use std::rc::Rc;

#[derive(Clone)]
pub struct ProductsRepository {
    client: Rc<ApiClient>,
    queries: QueryClient,
}

impl ProductsRepository {
    pub fn new_with_client(client: Rc<ApiClient>, queries: QueryClient) -> Self {
        Self { client, queries }
    }

    pub async fn list_products(&self, filters: &ProductFilters) -> Result<ProductsPage, ApiError> {
        let client = self.client.clone();
        let filters = filters.clone();
        self.queries
            .fetch(QueryKey::products(&filters), || async move {
                client.list_products(&filters).await
            })
            .await
    }

    /// Category names for the filter picker, alphabetically.
    pub async fn list_category_names(&self) -> Result<Vec<String>, ApiError> {
        let client = self.client.clone();
        let categories = self
            .queries
            .fetch(QueryKey::Categories, || async move { client.list_categories().await })
            .await?;
        let mut names: Vec<String> = categories.into_iter().map(|c| c.name).collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}
