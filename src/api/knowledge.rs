use super::models::{DeleteSourcesRequest, ReloadPathRequest, SearchQuery, SearchRequest};
use super::{ApiClient, ApiResult, RawResponse};
use crate::utils::url::{append_query, encode_component};

pub const KNOWLEDGE_STATUS: &str = "/api/knowledge/status";
pub const KNOWLEDGE_RELOAD: &str = "/api/knowledge/reload";
pub const KNOWLEDGE_RELOAD_PATH: &str = "/api/knowledge/reload-path";
pub const KNOWLEDGE_SEARCH: &str = "/api/knowledge/search";
pub const KNOWLEDGE_DELETE: &str = "/api/knowledge/delete";
pub const KNOWLEDGE_KEYWORDS: &str = "/api/knowledge/keywords";
pub const KNOWLEDGE_SEARCH_KEYWORDS: &str = "/api/knowledge/search-keywords";

#[derive(Clone, Copy)]
pub struct KnowledgeApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl KnowledgeApi<'_> {
    pub async fn status(self) -> ApiResult<RawResponse> {
        self.client.get(KNOWLEDGE_STATUS).await
    }

    pub async fn reload(self) -> ApiResult<RawResponse> {
        self.client.get(KNOWLEDGE_RELOAD).await
    }

    /// Re-index a single folder of the project.
    pub async fn reload_folder(self, path: &str) -> ApiResult<RawResponse> {
        self.client
            .post(KNOWLEDGE_RELOAD_PATH, &ReloadPathRequest { path })
            .await
    }

    pub async fn search(self, query: &SearchQuery) -> ApiResult<RawResponse> {
        self.client
            .post(KNOWLEDGE_SEARCH, &SearchRequest::from(query))
            .await
    }

    /// Drop the given sources from the index.
    pub async fn delete<S: AsRef<str>>(self, sources: &[S]) -> ApiResult<RawResponse> {
        let body = DeleteSourcesRequest {
            sources: sources.iter().map(AsRef::as_ref).collect(),
        };
        self.client.post(KNOWLEDGE_DELETE, &body).await
    }

    pub async fn keywords(self) -> ApiResult<RawResponse> {
        self.client.get(KNOWLEDGE_KEYWORDS).await
    }

    pub async fn search_keywords(self, query: &str) -> ApiResult<RawResponse> {
        let endpoint = append_query(KNOWLEDGE_SEARCH_KEYWORDS, "query", &encode_component(query));
        self.client.get(&endpoint).await
    }
}
