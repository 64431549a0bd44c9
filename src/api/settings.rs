use super::{ApiClient, ApiResult, RawResponse};
use crate::core::settings::Settings;
use tracing::warn;

pub const SETTINGS: &str = "/api/settings";

#[derive(Clone, Copy)]
pub struct SettingsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl SettingsApi<'_> {
    /// Fetch settings from the backend.
    ///
    /// A JSON object reply becomes the cached settings and is persisted;
    /// any other reply leaves the cache as it was.
    pub async fn read(self) -> ApiResult<RawResponse> {
        let response = self.client.get(SETTINGS).await?;
        match Settings::from_value(&response.data) {
            Some(settings) => self.client.store_loaded_settings(settings),
            None => warn!(body = %response.data, "settings reply is not an object; cache unchanged"),
        }
        Ok(response)
    }

    /// Push settings to the backend. The local cache only follows reads.
    pub async fn write(self, settings: &Settings) -> ApiResult<RawResponse> {
        self.client.put(SETTINGS, settings).await
    }
}
