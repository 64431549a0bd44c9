use super::{ApiClient, ApiResult, RawResponse};

pub const PROJECT_CREATE: &str = "/api/project/create";

#[derive(Clone, Copy)]
pub struct ProjectApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl ProjectApi<'_> {
    /// Ask the backend to initialize a project at the cached path.
    pub async fn create(self) -> ApiResult<RawResponse> {
        self.client.get(PROJECT_CREATE).await
    }
}
