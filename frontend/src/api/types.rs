use leptos::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Laravel-style `{ "data": ... }` wrapper used by every catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub products_count: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    pub category: ProductCategory,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub image_url: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub updated_at: String,
}

impl Product {
    pub fn price_value(&self) -> f64 {
        self.price.trim().parse::<f64>().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsPage {
    pub current_page: u32,
    #[serde(default)]
    pub data: Vec<Product>,
    pub per_page: u32,
    pub total: u64,
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
    #[serde(default)]
    pub first_page_url: Option<String>,
    #[serde(default)]
    pub last_page_url: Option<String>,
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde(default)]
    pub prev_page_url: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensiveProduct {
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub image_url: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category_name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
}

impl From<ExpensiveProduct> for Product {
    fn from(value: ExpensiveProduct) -> Self {
        Product {
            id: value.id,
            title: value.title,
            price: value.price,
            description: value.description,
            category: ProductCategory {
                id: 0,
                name: value.category_name,
            },
            image_url: value.image_url,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_products: i64,
    #[serde(deserialize_with = "f64_from_string_or_number")]
    pub avg_price: f64,
    #[serde(default)]
    pub by_category: Vec<CategoryTotal>,
    #[serde(default)]
    pub top5_expensive: Vec<ExpensiveProduct>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    Full,
    Delta,
    Limited,
}

impl SyncMode {
    pub const ALL: [SyncMode; 3] = [SyncMode::Full, SyncMode::Delta, SyncMode::Limited];

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Full => "full",
            SyncMode::Delta => "delta",
            SyncMode::Limited => "limited",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SyncMode::Full => {
                "Sincroniza todos os produtos da Fake Store API, substituindo dados existentes."
            }
            SyncMode::Delta => {
                "Sincroniza apenas produtos novos ou modificados desde a última sincronização."
            }
            SyncMode::Limited => "Sincroniza um número específico de produtos da Fake Store API.",
        }
    }
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub mode: SyncMode,
    pub limit: Option<u32>,
}

impl SyncRequest {
    pub fn new(mode: SyncMode, limit: Option<u32>) -> Self {
        Self { mode, limit }
    }

    /// `limit` only travels with the `limited` mode.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("mode", self.mode.as_str().to_string())];
        if let (SyncMode::Limited, Some(limit)) = (self.mode, self.limit) {
            if limit > 0 {
                params.push(("limit", limit.to_string()));
            }
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncErrorContext {
    #[serde(default)]
    pub product_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncError {
    pub message: String,
    #[serde(default)]
    pub context: SyncErrorContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedProduct {
    pub id: i64,
    pub title: String,
    pub external_id: i64,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub price: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedProduct {
    pub id: i64,
    pub title: String,
    pub external_id: i64,
    #[serde(default)]
    pub reason: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub price: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    #[serde(default)]
    pub imported: u32,
    #[serde(default)]
    pub updated: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub errors: Vec<SyncError>,
    #[serde(default)]
    pub imported_products: Option<Vec<SyncedProduct>>,
    #[serde(default)]
    pub updated_products: Option<Vec<SyncedProduct>>,
    #[serde(default)]
    pub skipped_products: Option<Vec<SkippedProduct>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub success: bool,
    pub mode: SyncMode,
    #[serde(default)]
    pub limit: Option<u32>,
    pub result: SyncResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityEvent {
    Created,
    Updated,
    Deleted,
    #[serde(other)]
    Other,
}

impl ActivityEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityEvent::Created => "created",
            ActivityEvent::Updated => "updated",
            ActivityEvent::Deleted => "deleted",
            ActivityEvent::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityProperties {
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub old: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Causer {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    pub event: ActivityEvent,
    #[serde(default, deserialize_with = "properties_or_default")]
    pub properties: ActivityProperties,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub created_at: String,
    #[serde(default)]
    pub causer: Option<Causer>,
}

impl ActivityLog {
    pub fn causer_name(&self) -> String {
        self.causer
            .as_ref()
            .map(|c| c.name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Sistema".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Title => "title",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price" => Some(SortField::Price),
            "title" => Some(SortField::Title),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Price => "Preço",
            SortField::Title => "Título",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "Crescente",
            SortOrder::Desc => "Decrescente",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

pub const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilters {
    pub q: Option<String>,
    pub category: Option<String>,
    pub categories: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProductFilters {
    /// Starting point for the product list before the URL is applied.
    pub fn first_page() -> Self {
        Self {
            page: Some(1),
            per_page: Some(DEFAULT_PER_PAGE),
            ..Self::default()
        }
    }

    /// Overlays every field that is set in `other`.
    pub fn merged_with(mut self, other: ProductFilters) -> Self {
        if other.q.is_some() {
            self.q = other.q;
        }
        if other.category.is_some() {
            self.category = other.category;
        }
        if !other.categories.is_empty() {
            self.categories = other.categories;
        }
        if other.min_price.is_some() {
            self.min_price = other.min_price;
        }
        if other.max_price.is_some() {
            self.max_price = other.max_price;
        }
        if other.sort.is_some() {
            self.sort = other.sort;
        }
        if other.order.is_some() {
            self.order = other.order;
        }
        if other.page.is_some() {
            self.page = other.page;
        }
        if other.per_page.is_some() {
            self.per_page = other.per_page;
        }
        self
    }

    pub fn has_any_filter(&self) -> bool {
        self.q.as_deref().is_some_and(|q| !q.is_empty())
            || !self.categories.is_empty()
            || self.min_price.is_some_and(|v| v != 0.0)
            || self.max_price.is_some_and(|v| v != 0.0)
            || self.sort.is_some()
    }

    /// Filters left after "Limpar": only pagination survives.
    pub fn cleared(&self) -> Self {
        Self {
            page: Some(1),
            per_page: Some(self.per_page.unwrap_or(DEFAULT_PER_PAGE)),
            ..Self::default()
        }
    }

    /// Present, non-empty fields in declaration order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if !self.categories.is_empty() {
            pairs.push(("categories", self.categories.join(",")));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

pub const MISSING_CLIENT_ID_CODE: &str = "integration.missing_client_id";
pub const COMMUNICATION_ERROR_MESSAGE: &str = "Erro na comunicação com o servidor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Message(String),
    Detailed(DetailedError),
}

#[derive(Deserialize)]
struct DetailedError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    context: Option<Value>,
    #[serde(default)]
    request_id: Option<String>,
}

impl ApiError {
    fn new(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
            status: None,
            request_id: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::new(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::new(msg, "REQUEST_FAILED")
    }

    /// Normalises a non-success response body into an `ApiError`.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                error: ErrorBody::Message(message),
            }) => Self {
                status: Some(status),
                ..Self::new(message, "HTTP_ERROR")
            },
            Ok(ErrorEnvelope {
                error: ErrorBody::Detailed(detail),
            }) => Self {
                error: detail.message,
                code: detail.code,
                details: detail.context,
                status: Some(detail.status.unwrap_or(status)),
                request_id: detail.request_id,
            },
            Err(_) => Self {
                status: Some(status),
                details: (!body.trim().is_empty()).then(|| Value::String(body.to_string())),
                ..Self::request_failed(COMMUNICATION_ERROR_MESSAGE)
            },
        }
    }

    /// Text shown in the error toast.
    pub fn toast_message(&self) -> String {
        match self.request_id.as_deref() {
            Some(id) if !id.is_empty() => format!("{} (ID: {})", self.error, id),
            _ => self.error.clone(),
        }
    }

    pub fn is_missing_client_id(&self) -> bool {
        self.status == Some(400) && self.code == MISSING_CLIENT_ID_CODE
    }
}

fn value_to_plain_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(_) | Value::Number(_) => Ok(value_to_plain_string(value)),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.is_null())
        .map(value_to_plain_string))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(value_to_plain_string).unwrap_or_default())
}

fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        Value::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "expected number, got {}",
            other
        ))),
    }
}

// Laravel serialises an empty properties bag as `[]`.
fn properties_or_default<'de, D>(deserializer: D) -> Result<ActivityProperties, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => {
            serde_json::from_value(Value::Object(map)).map_err(serde::de::Error::custom)
        }
        _ => Ok(ActivityProperties::default()),
    }
}
