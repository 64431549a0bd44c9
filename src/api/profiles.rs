//! Named configuration bundles stored by the backend.

use super::{ApiClient, ApiResult, RawResponse};
use crate::utils::url::encode_component;
use serde_json::Value;

pub const PROFILES: &str = "/api/profiles";

#[derive(Clone, Copy)]
pub struct ProfilesApi<'a> {
    pub(super) client: &'a ApiClient,
}

fn profile_endpoint(name: &str) -> String {
    format!("{PROFILES}/{}", encode_component(name))
}

impl ProfilesApi<'_> {
    pub async fn list(self) -> ApiResult<RawResponse> {
        self.client.get(PROFILES).await
    }

    pub async fn load(self, name: &str) -> ApiResult<RawResponse> {
        self.client.get(&profile_endpoint(name)).await
    }

    pub async fn save(self, name: &str, profile: &Value) -> ApiResult<RawResponse> {
        self.client.post(&profile_endpoint(name), profile).await
    }

    pub async fn delete(self, name: &str) -> ApiResult<RawResponse> {
        self.client.delete(&profile_endpoint(name)).await
    }
}
