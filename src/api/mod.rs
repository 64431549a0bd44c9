//! Client for the gpt-engineer backend's HTTP API.
//!
//! [`ApiClient`] is constructed once and shared by reference (wrap it in an
//! `Arc` to hand it to spawned tasks). Calls are grouped the way the backend
//! groups its routes:
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use gpteng_client::api::ApiClient;
//!
//! let client = ApiClient::builder("http://localhost:8000").build()?;
//! client.settings().read().await?;
//! let mut chat = client.chats().new_chat();
//! chat.push_user("Add a README");
//! client.chats().message(&mut chat).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every call returns an [`ApiResult`]. Failures are logged where they occur
//! and handed back as [`ApiError`] values; nothing panics past this layer.

pub mod chats;
pub mod error;
pub mod images;
pub mod knowledge;
pub mod live;
pub mod models;
pub mod profiles;
pub mod project;
pub mod run;
pub mod settings;


pub use error::{ApiError, ApiResult};
pub use live::LiveRequests;
pub use models::{RawResponse, SearchQuery};

use crate::core::config::Config;
use crate::core::settings::{self as cached, Settings, SettingsState, PATH_KEY};
use crate::core::store::{MemoryStore, SettingsStore};
use crate::utils::url::{append_query, construct_api_url, encode_component, origin_of};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Query value sent while no settings are cached.
pub const UNSET_PATH_PARAM: &str = "undefined";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    origin: String,
    settings: RwLock<SettingsState>,
    store: Arc<dyn SettingsStore>,
    live: LiveRequests,
}

pub struct ApiClientBuilder {
    base_url: String,
    http: Option<reqwest::Client>,
    store: Option<Arc<dyn SettingsStore>>,
    launch_url: Option<String>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Use an existing HTTP client instead of building one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Where the settings cache lives. Defaults to an in-memory store.
    pub fn store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Page URL whose `gpteng_path` query parameter seeds the settings.
    pub fn launch_url(mut self, launch_url: impl Into<String>) -> Self {
        self.launch_url = Some(launch_url.into());
        self
    }

    /// Request timeout for the internally built HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> ApiResult<ApiClient> {
        let origin = origin_of(&self.base_url)
            .ok_or_else(|| ApiError::InvalidBaseUrl(self.base_url.clone()))?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn SettingsStore>);
        let state = SettingsState::bootstrap(self.launch_url.as_deref(), store.as_ref());

        Ok(ApiClient {
            http,
            base_url: self.base_url,
            origin,
            settings: RwLock::new(state),
            store,
            live: LiveRequests::new(),
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            http: None,
            store: None,
            launch_url: None,
            timeout: None,
        }
    }

    /// Client wired from the on-disk configuration: base URL, timeout,
    /// launch URL and the file-backed settings cache.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let mut builder = Self::builder(config.base_url());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(launch_url) = &config.launch_url {
            builder = builder.launch_url(launch_url.clone());
        }
        match config.settings_store() {
            Some(store) => builder = builder.store(Arc::new(store)),
            None => warn!("no data directory available; settings will not persist"),
        }
        builder.build()
    }

    pub fn project(&self) -> project::ProjectApi<'_> {
        project::ProjectApi { client: self }
    }

    pub fn settings(&self) -> settings::SettingsApi<'_> {
        settings::SettingsApi { client: self }
    }

    pub fn knowledge(&self) -> knowledge::KnowledgeApi<'_> {
        knowledge::KnowledgeApi { client: self }
    }

    pub fn chats(&self) -> chats::ChatsApi<'_> {
        chats::ChatsApi { client: self }
    }

    pub fn run(&self) -> run::RunApi<'_> {
        run::RunApi { client: self }
    }

    pub fn profiles(&self) -> profiles::ProfilesApi<'_> {
        profiles::ProfilesApi { client: self }
    }

    pub fn images(&self) -> images::ImagesApi<'_> {
        images::ImagesApi { client: self }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn live_requests(&self) -> &LiveRequests {
        &self.live
    }

    pub fn settings_state(&self) -> SettingsState {
        self.settings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn cached_settings(&self) -> Option<Settings> {
        self.settings_state().settings().cloned()
    }

    /// Override the cached path token, as a `?gpteng_path=` launch would.
    pub fn set_gpteng_path(&self, path: impl Into<String>) {
        let settings = Settings::with_path(path);
        let mut state = self.settings.write().unwrap_or_else(|e| e.into_inner());
        *state = SettingsState::Bootstrapped {
            settings,
            source: cached::SettingsSource::QueryString,
        };
    }

    /// Value of the identifying query parameter, already percent-encoded.
    pub fn path_param(&self) -> String {
        let state = self.settings.read().unwrap_or_else(|e| e.into_inner());
        match state.gpteng_path() {
            Some(path) => encode_component(path),
            None => UNSET_PATH_PARAM.to_string(),
        }
    }

    pub(crate) fn store_loaded_settings(&self, settings: Settings) {
        if let Err(err) = cached::persist(self.store.as_ref(), &settings) {
            warn!(error = %err, "failed to persist settings");
        }
        let mut state = self.settings.write().unwrap_or_else(|e| e.into_inner());
        *state = SettingsState::Loaded(settings);
    }

    /// Absolute URL for `endpoint` with the identifying parameter appended.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let with_query = append_query(endpoint, PATH_KEY, &self.path_param());
        construct_api_url(&self.base_url, &with_query)
    }

    pub(crate) fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint_url(endpoint))
    }

    pub(crate) async fn get(&self, endpoint: &str) -> ApiResult<RawResponse> {
        let request = self.request(Method::GET, endpoint);
        self.execute(Method::GET, endpoint, request).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> ApiResult<RawResponse> {
        let request = self.request(Method::DELETE, endpoint);
        self.execute(Method::DELETE, endpoint, request).await
    }

    pub(crate) async fn post<B>(&self, endpoint: &str, body: &B) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, endpoint).json(body);
        self.execute(Method::POST, endpoint, request).await
    }

    pub(crate) async fn put<B>(&self, endpoint: &str, body: &B) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, endpoint).json(body);
        self.execute(Method::PUT, endpoint, request).await
    }

    /// Send a prepared request while it is counted as in flight.
    pub(crate) async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        request: RequestBuilder,
    ) -> ApiResult<RawResponse> {
        let _guard = self.live.track();
        debug!(%method, endpoint, "sending request");

        let result = dispatch(request).await;
        match &result {
            Ok(response) => debug!(%method, endpoint, status = response.status, "request settled"),
            Err(err) => warn!(%method, endpoint, error = %err, "request failed"),
        }
        result
    }
}

/// Log a failure raised outside [`ApiClient::execute`] (reading the reply's
/// shape, preparing the request) and hand it back to the caller.
pub(crate) fn reject(endpoint: &str, err: ApiError) -> ApiError {
    warn!(endpoint, error = %err, "request failed");
    err
}

async fn dispatch(request: RequestBuilder) -> ApiResult<RawResponse> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(RawResponse::from_body(status.as_u16(), &body))
}
