//! Read-through cache of server state with per-query staleness.

use leptos::*;
use std::{any::Any, cell::RefCell, collections::HashMap, future::Future, rc::Rc, time::Duration};

use crate::api::{ApiError, ProductFilters};
use crate::utils::query::build_query;

const FIVE_MINUTES: Duration = Duration::from_secs(5 * 60);
const TEN_MINUTES: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Product list, keyed by its encoded filters.
    Products(String),
    ProductsByCategory(String),
    CheapestProducts,
    Product(i64),
    ProductActivity(i64),
    Categories,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryScope {
    Products,
    Product,
    Categories,
    Stats,
    Activity,
}

impl QueryScope {
    pub const ALL: [QueryScope; 5] = [
        QueryScope::Products,
        QueryScope::Product,
        QueryScope::Categories,
        QueryScope::Stats,
        QueryScope::Activity,
    ];
}

impl QueryKey {
    pub fn products(filters: &ProductFilters) -> Self {
        QueryKey::Products(build_query(filters))
    }

    pub fn scope(&self) -> QueryScope {
        match self {
            QueryKey::Products(_)
            | QueryKey::ProductsByCategory(_)
            | QueryKey::CheapestProducts => QueryScope::Products,
            QueryKey::Product(_) => QueryScope::Product,
            QueryKey::ProductActivity(_) => QueryScope::Activity,
            QueryKey::Categories => QueryScope::Categories,
            QueryKey::Stats => QueryScope::Stats,
        }
    }

    pub fn stale_time(&self) -> Duration {
        match self {
            QueryKey::Categories | QueryKey::Stats | QueryKey::CheapestProducts => TEN_MINUTES,
            _ => FIVE_MINUTES,
        }
    }
}

struct CacheEntry {
    value: Rc<dyn Any>,
    fetched_at_ms: f64,
}

/// Plain map half of the query client; time is passed in by the caller.
#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
}

impl QueryCache {
    pub fn get_fresh<T: Clone + 'static>(&self, key: &QueryKey, now_ms: f64) -> Option<T> {
        let entry = self.entries.get(key)?;
        let age_ms = now_ms - entry.fetched_at_ms;
        if age_ms < 0.0 || age_ms >= key.stale_time().as_millis() as f64 {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Stores `value`, dropping entries that are already past their stale time.
    pub fn put<T: 'static>(&mut self, key: QueryKey, value: T, now_ms: f64) {
        self.entries.retain(|cached, entry| {
            now_ms - entry.fetched_at_ms < cached.stale_time().as_millis() as f64
        });
        self.entries.insert(
            key,
            CacheEntry {
                value: Rc::new(value),
                fetched_at_ms: now_ms,
            },
        );
    }

    pub fn invalidate(&mut self, scope: QueryScope) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.scope() != scope);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

#[derive(Clone, Copy)]
struct Revisions {
    products: RwSignal<u64>,
    product: RwSignal<u64>,
    categories: RwSignal<u64>,
    stats: RwSignal<u64>,
    activity: RwSignal<u64>,
}

impl Revisions {
    fn new() -> Self {
        Self {
            products: create_rw_signal(0),
            product: create_rw_signal(0),
            categories: create_rw_signal(0),
            stats: create_rw_signal(0),
            activity: create_rw_signal(0),
        }
    }

    fn signal(&self, scope: QueryScope) -> RwSignal<u64> {
        match scope {
            QueryScope::Products => self.products,
            QueryScope::Product => self.product,
            QueryScope::Categories => self.categories,
            QueryScope::Stats => self.stats,
            QueryScope::Activity => self.activity,
        }
    }
}

#[derive(Clone)]
pub struct QueryClient {
    cache: Rc<RefCell<QueryCache>>,
    revisions: Revisions,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: Rc::new(RefCell::new(QueryCache::default())),
            revisions: Revisions::new(),
        }
    }

    /// Tracked read; resources that include it refetch after `invalidate`.
    pub fn revision(&self, scope: QueryScope) -> u64 {
        self.revisions.signal(scope).get()
    }

    /// Serves a fresh cached value or runs `fetcher`. Errors are not cached.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Clone + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.cache.borrow().get_fresh::<T>(&key, now_ms()) {
            return Ok(hit);
        }
        let value = fetcher().await?;
        self.cache.borrow_mut().put(key, value.clone(), now_ms());
        Ok(value)
    }

    pub fn invalidate(&self, scope: QueryScope) {
        let dropped = self.cache.borrow_mut().invalidate(scope);
        log::debug!("Invalidated {:?} ({} cached queries)", scope, dropped);
        self.revisions.signal(scope).update(|rev| *rev += 1);
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
        for scope in QueryScope::ALL {
            self.revisions.signal(scope).update(|rev| *rev += 1);
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_client() -> QueryClient {
    match use_context::<QueryClient>() {
        Some(client) => client,
        None => {
            let client = QueryClient::new();
            provide_context(client.clone());
            client
        }
    }
}
