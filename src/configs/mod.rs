use std::time::Duration;

use url::Url;

use crate::{api::error, constants::Env};

/// Connection settings for the ImageKit REST API.
#[derive(Debug, Clone)]
pub struct ImageKitConfig {
    pub public_key: String,
    pub private_key: String,
    pub url_endpoint: Url,
    pub api_base: Url,
    pub upload_base: Url,
    pub timeout: Duration,
}

impl ImageKitConfig {
    pub fn from_env(env: &Env) -> Result<Self, error::SystemError> {
        Ok(Self {
            public_key: env.public_key.clone(),
            private_key: env.private_key.clone(),
            url_endpoint: parse_base("IMAGEKIT_URL_ENDPOINT", &env.url_endpoint)?,
            api_base: parse_base("IMAGEKIT_API_BASE", &env.api_base)?,
            upload_base: parse_base("IMAGEKIT_UPLOAD_BASE", &env.upload_base)?,
            timeout: Duration::from_secs(env.timeout_secs),
        })
    }
}

fn parse_base(key: &str, raw: &str) -> Result<Url, error::SystemError> {
    let url = Url::parse(raw)
        .map_err(|e| error::SystemError::config(format!("invalid {key} '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(error::SystemError::config(format!("{key} must be an http(s) URL")));
    }
    Ok(url)
}

pub fn build_http_client(config: &ImageKitConfig) -> Result<reqwest::Client, error::SystemError> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    Ok(client)
}
