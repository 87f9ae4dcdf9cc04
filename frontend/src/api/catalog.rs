use crate::api::{
    client::ApiClient,
    routes,
    types::{ActivityLog, ApiError, Category, Product, ProductFilters, ProductsPage, Stats},
};

pub const CATEGORY_PAGE_SIZE: u32 = 100;
pub const CHEAPEST_LIMIT: u32 = 5;

impl ApiClient {
    pub async fn list_products(&self, filters: &ProductFilters) -> Result<ProductsPage, ApiError> {
        self.get_data(routes::PRODUCTS, &filters.to_query_pairs())
            .await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        self.get_data(&routes::product(id), &[]).await
    }

    pub async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, ApiError> {
        if category.trim().is_empty() {
            return Err(ApiError::validation("Categoria obrigatória"));
        }
        let page: ProductsPage = self
            .get_data(
                routes::PRODUCTS,
                &[
                    ("category", category.to_string()),
                    ("per_page", CATEGORY_PAGE_SIZE.to_string()),
                ],
            )
            .await?;
        Ok(page.data)
    }

    pub async fn list_cheapest_products(&self) -> Result<Vec<Product>, ApiError> {
        let page: ProductsPage = self
            .get_data(
                routes::PRODUCTS,
                &[
                    ("sort", "price".to_string()),
                    ("order", "asc".to_string()),
                    ("per_page", CHEAPEST_LIMIT.to_string()),
                ],
            )
            .await?;
        Ok(page.data)
    }

    pub async fn get_product_activity(&self, id: i64) -> Result<Vec<ActivityLog>, ApiError> {
        self.get_data(&routes::product_activity(id), &[]).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_data(routes::CATEGORIES, &[]).await
    }

    pub async fn get_stats(&self) -> Result<Stats, ApiError> {
        self.get_data(routes::STATS, &[]).await
    }

    pub async fn delete_all_products(&self) -> Result<(), ApiError> {
        self.delete(routes::PRODUCTS_ALL).await
    }
}
