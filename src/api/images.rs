use super::{reject, ApiClient, ApiError, ApiResult};
use crate::utils::url::construct_api_url;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use std::path::Path;

pub const IMAGE_UPLOAD: &str = "/api/images/upload";

/// An image ready to be sent as the `file` field of a multipart form.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<&'static str>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name).first_raw();
        Self {
            file_name,
            bytes,
            mime,
        }
    }

    pub async fn from_path(path: &Path) -> ApiResult<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            reject(IMAGE_UPLOAD, ApiError::File {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_form(self) -> ApiResult<Form> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(mime) = self.mime {
            part = part
                .mime_str(mime)
                .map_err(|err| reject(IMAGE_UPLOAD, err.into()))?;
        }
        Ok(Form::new().part("file", part))
    }
}

/// Resolve the path returned by an upload against the backend's origin.
pub fn absolute_image_url(origin: &str, reply: &Value) -> ApiResult<String> {
    let Some(path) = reply.as_str().map(str::trim).filter(|p| !p.is_empty()) else {
        return Err(ApiError::UnexpectedUploadReply(reply.clone()));
    };
    if path.starts_with("http://") || path.starts_with("https://") {
        return Ok(path.to_string());
    }
    Ok(construct_api_url(origin, path))
}

#[derive(Clone, Copy)]
pub struct ImagesApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl ImagesApi<'_> {
    /// Upload an image and return the absolute URL it is served from.
    pub async fn upload(self, file: ImageFile) -> ApiResult<String> {
        let form = file.into_form()?;
        let request = self
            .client
            .request(Method::POST, IMAGE_UPLOAD)
            .multipart(form);
        let response = self
            .client
            .execute(Method::POST, IMAGE_UPLOAD, request)
            .await?;
        absolute_image_url(self.client.origin(), &response.data)
            .map_err(|err| reject(IMAGE_UPLOAD, err))
    }

    pub async fn upload_path(self, path: &Path) -> ApiResult<String> {
        self.upload(ImageFile::from_path(path).await?).await
    }
}
