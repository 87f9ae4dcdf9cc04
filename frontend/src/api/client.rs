use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::{fmt, rc::Rc, time::Duration};

use crate::{
    api::{
        routes,
        types::{ApiError, DataEnvelope, COMMUNICATION_ERROR_MESSAGE},
    },
    config,
};

pub const CLIENT_ID_HEADER: &str = "X-Client-Id";
#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Called once for every request that finally fails.
pub type ErrorReporter = Rc<dyn Fn(&ApiError)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    client_id: Option<String>,
    retry: RetryPolicy,
    reporter: Option<ErrorReporter>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("retry", &self.retry)
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_http_client() -> Client {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new())
    }
    #[cfg(target_arch = "wasm32")]
    {
        Client::new()
    }
}

async fn backoff_sleep(delay: Duration) {
    #[cfg(target_arch = "wasm32")]
    {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
    // Host builds only run under tests, which use zero delays.
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = delay;
    }
}

fn should_retry(error: &ApiError) -> bool {
    match error.status {
        None => error.code == "REQUEST_FAILED",
        Some(status) => status >= 500,
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: build_http_client(),
            base_url: None,
            client_id: None,
            retry: RetryPolicy::default(),
            reporter: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_error_reporter(mut self, reporter: ErrorReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn resolved_client_id(&self) -> Option<String> {
        self.client_id.clone().or_else(config::client_id)
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = routes::join(&self.resolved_base_url().await, path);
        let builder = self.http_client().request(method, url);
        match self.resolved_client_id() {
            Some(id) => builder.header(CLIENT_ID_HEADER, id),
            None => builder,
        }
    }

    /// Sends once and returns the body of a 2xx response.
    async fn send_once(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError {
            details: Some(serde_json::Value::String(e.to_string())),
            ..ApiError::request_failed(COMMUNICATION_ERROR_MESSAGE)
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError {
            status: Some(status.as_u16()),
            details: Some(serde_json::Value::String(e.to_string())),
            ..ApiError::request_failed(COMMUNICATION_ERROR_MESSAGE)
        })?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }

    fn report<T>(
        &self,
        method: &Method,
        path: &str,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        if let Err(error) = &result {
            log::error!("{} {} failed: {} ({})", method, path, error, error.code);
            if let Some(reporter) = &self.reporter {
                reporter(error);
            }
        }
        result
    }

    async fn get_body(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<String, ApiError> {
        let mut attempt = 0;
        loop {
            let request = self.request(Method::GET, path).await.query(query);
            match self.send_once(request).await {
                Err(error) if attempt < self.retry.max_retries && should_retry(&error) => {
                    let delay = self.retry.delay_for(attempt);
                    log::warn!(
                        "GET {} failed ({}), retrying in {:?}",
                        path,
                        error,
                        delay
                    );
                    backoff_sleep(delay).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    /// GET returning the `data` member of the response envelope.
    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let result = match self.get_body(path, query).await {
            Ok(body) => decode::<DataEnvelope<T>>(&body).map(|envelope| envelope.data),
            Err(error) => Err(error),
        };
        self.report(&Method::GET, path, result)
    }

    /// POST with query parameters and no body; never retried.
    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path).await.query(query);
        let result = match self.send_once(request).await {
            Ok(body) => decode::<T>(&body),
            Err(error) => Err(error),
        };
        self.report(&Method::POST, path, result)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path).await;
        let result = self.send_once(request).await.map(|_| ());
        self.report(&Method::DELETE, path, result)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
}
