use crate::api::error::SystemError;

pub const DEFAULT_API_BASE: &str = "https://api.imagekit.io";
pub const DEFAULT_UPLOAD_BASE: &str = "https://upload.imagekit.io";
pub const DEFAULT_FOLDER: &str = "/uploads";
pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
/// Lifetime of client-side upload signatures, in seconds.
pub const AUTH_EXPIRE_SECS: i64 = 60 * 30;

pub struct Env {
    pub public_key: String,
    pub private_key: String,
    pub url_endpoint: String,
    pub api_base: String,
    pub upload_base: String,
    pub timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub ip: String,
    pub port: u16,
}

impl Env {
    pub fn from_env() -> Result<Self, SystemError> {
        let public_key = required("IMAGEKIT_PUBLIC_KEY")?;
        let private_key = required("IMAGEKIT_PRIVATE_KEY")?;
        let url_endpoint = required("IMAGEKIT_URL_ENDPOINT")?;

        let api_base =
            std::env::var("IMAGEKIT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let upload_base = std::env::var("IMAGEKIT_UPLOAD_BASE")
            .unwrap_or_else(|_| DEFAULT_UPLOAD_BASE.to_string());

        let timeout_secs = std::env::var("IMAGEKIT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|e| SystemError::config(format!("invalid IMAGEKIT_TIMEOUT_SECS: {e}")))?;
        let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse::<usize>()
            .map_err(|e| SystemError::config(format!("invalid MAX_UPLOAD_BYTES: {e}")))?;

        let ip = std::env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| SystemError::config(format!("invalid PORT: {e}")))?;

        Ok(Env {
            public_key,
            private_key,
            url_endpoint,
            api_base,
            upload_base,
            timeout_secs,
            max_upload_bytes,
            ip,
            port,
        })
    }
}

fn required(key: &'static str) -> Result<String, SystemError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SystemError::config(format!(
            "{key} must be set in .env file or environment variable"
        ))),
    }
}
