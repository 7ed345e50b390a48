use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::{
    api::error,
    configs::{build_http_client, ImageKitConfig},
    constants::AUTH_EXPIRE_SECS,
    modules::image::{
        gateway::MediaGateway,
        model::{AuthParams, ListOptions, UploadPayload, UploadRequest},
        schema::{ProviderErrorBody, RawFile},
    },
    utils::hmac_sha1_hex,
};

#[derive(Clone)]
pub struct ImageKitGateway {
    client: reqwest::Client,
    config: ImageKitConfig,
}

impl ImageKitGateway {
    pub fn new(config: ImageKitConfig) -> Result<Self, error::SystemError> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ImageKitConfig {
        &self.config
    }

    fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, error::SystemError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| error::SystemError::config("provider base URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn sign(&self, token: &str, expire: i64) -> Result<String, error::SystemError> {
        hmac_sha1_hex(&self.config.private_key, &format!("{token}{expire}"))
    }
}

async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, error::SystemError> {
    if !res.status().is_success() {
        return Err(provider_error(res).await);
    }
    let bytes = res.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn provider_error(res: reqwest::Response) -> error::SystemError {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProviderErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());
    error::SystemError::provider(message)
}

#[async_trait::async_trait]
impl MediaGateway for ImageKitGateway {
    fn auth_params(&self) -> Result<AuthParams, error::SystemError> {
        let token = Uuid::new_v4().to_string();
        let expire = chrono::Utc::now().timestamp() + AUTH_EXPIRE_SECS;
        let signature = self.sign(&token, expire)?;
        Ok(AuthParams { token, expire, signature })
    }

    async fn upload(&self, request: UploadRequest) -> Result<RawFile, error::SystemError> {
        let url = Self::endpoint(&self.config.upload_base, &["api", "v1", "files", "upload"])?;

        let file_part = match request.payload {
            UploadPayload::Binary(bytes) => {
                let mime = mime_guess::from_path(&request.file_name).first_or_octet_stream();
                Part::bytes(bytes).file_name(request.file_name.clone()).mime_str(mime.as_ref())?
            }
            UploadPayload::Base64(data) => Part::text(data),
        };

        let form = Form::new()
            .part("file", file_part)
            .text("fileName", request.file_name)
            .text("folder", request.folder);

        let res = self
            .client
            .post(url)
            .basic_auth(&self.config.private_key, Some(""))
            .multipart(form)
            .send()
            .await?;

        read_json(res).await
    }

    async fn list(&self, options: &ListOptions) -> Result<Vec<RawFile>, error::SystemError> {
        let url = Self::endpoint(&self.config.api_base, &["v1", "files"])?;

        let mut query = vec![("limit", options.limit.to_string()), ("skip", options.skip.to_string())];
        if let Some(path) = &options.path {
            query.push(("path", path.clone()));
        }
        if let Some(file_type) = options.file_type {
            query.push(("fileType", file_type.as_str().to_string()));
        }

        let res = self
            .client
            .get(url)
            .query(&query)
            .basic_auth(&self.config.private_key, Some(""))
            .send()
            .await?;

        read_json(res).await
    }

    async fn details(&self, file_id: &str) -> Result<RawFile, error::SystemError> {
        let url = Self::endpoint(&self.config.api_base, &["v1", "files", file_id, "details"])?;

        let res =
            self.client.get(url).basic_auth(&self.config.private_key, Some("")).send().await?;

        read_json(res).await
    }

    async fn delete(&self, file_id: &str) -> Result<(), error::SystemError> {
        let url = Self::endpoint(&self.config.api_base, &["v1", "files", file_id])?;

        let res =
            self.client.delete(url).basic_auth(&self.config.private_key, Some("")).send().await?;

        if !res.status().is_success() {
            return Err(provider_error(res).await);
        }
        Ok(())
    }
}
