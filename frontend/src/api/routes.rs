//! Backend paths, relative to the resolved API base URL.

pub const PRODUCTS: &str = "/catalogo/products";
pub const PRODUCTS_ALL: &str = "/catalogo/products/all";
pub const CATEGORIES: &str = "/catalogo/categories";
pub const STATS: &str = "/catalogo/stats";
pub const FAKESTORE_SYNC: &str = "/integracoes/fakestore/sync";

pub fn product(id: i64) -> String {
    format!("{}/{}", PRODUCTS, id)
}

pub fn product_activity(id: i64) -> String {
    format!("{}/{}/activity", PRODUCTS, id)
}

/// Joins `path` onto `base`, tolerating a trailing slash on the base.
pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_paths_embed_id() {
        assert_eq!(product(12), "/catalogo/products/12");
        assert_eq!(product_activity(12), "/catalogo/products/12/activity");
    }

    #[test]
    fn join_strips_trailing_slash() {
        assert_eq!(
            join("http://localhost:8000/api/", STATS),
            "http://localhost:8000/api/catalogo/stats"
        );
        assert_eq!(
            join("http://localhost:8000/api", FAKESTORE_SYNC),
            "http://localhost:8000/api/integracoes/fakestore/sync"
        );
    }
}
