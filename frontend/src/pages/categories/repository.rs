use crate::api::{ApiClient, ApiError, Category, Product};
use crate::state::query::{QueryClient, QueryKey};
use std::rc::Rc;

#[derive(Clone)]
pub struct CategoriesRepository {
    client: Rc<ApiClient>,
    queries: QueryClient,
}

impl CategoriesRepository {
    pub fn new_with_client(client: Rc<ApiClient>, queries: QueryClient) -> Self {
        Self { client, queries }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let client = self.client.clone();
        self.queries
            .fetch(QueryKey::Categories, || async move { client.list_categories().await })
            .await
    }

    pub async fn list_products_in(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        let client = self.client.clone();
        let name = category.to_string();
        self.queries
            .fetch(QueryKey::ProductsByCategory(name.clone()), || async move {
                client.list_products_by_category(&name).await
            })
            .await
    }
}
