//! Long-running generation work. Each call is a single request; the backend
//! decides how long it takes and the client neither polls nor streams.

use super::{ApiClient, ApiResult, RawResponse};
use crate::core::chat::Chat;

pub const RUN_IMPROVE: &str = "/api/run/improve";
pub const RUN_EDIT: &str = "/api/run/edit";

#[derive(Clone, Copy)]
pub struct RunApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl RunApi<'_> {
    pub async fn improve(self, chat: &Chat) -> ApiResult<RawResponse> {
        self.client.post(RUN_IMPROVE, chat).await
    }

    pub async fn edit(self, chat: &Chat) -> ApiResult<RawResponse> {
        self.client.post(RUN_EDIT, chat).await
    }
}
