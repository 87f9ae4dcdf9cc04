use crate::api::{
    client::ApiClient,
    routes,
    types::{ApiError, SyncRequest, SyncResponse},
};

impl ApiClient {
    /// Triggers a Fake Store import; the body is returned unwrapped.
    pub async fn sync(&self, request: &SyncRequest) -> Result<SyncResponse, ApiError> {
        self.post_query(routes::FAKESTORE_SYNC, &request.query_params()).await
    }
}
