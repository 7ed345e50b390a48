use actix_multipart::{Field, Multipart};
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::{future::LocalBoxFuture, TryStreamExt};
use serde_json::Value;

use crate::{
    api::error,
    constants::{DEFAULT_FOLDER, DEFAULT_MAX_UPLOAD_BYTES},
    modules::image::model::{UploadPayload, UploadRequest},
    utils::{now_millis, strip_data_url},
};

pub const MISSING_JSON_FILE: &str = r#"Missing "file" (base64) in JSON body"#;
pub const MISSING_MULTIPART_FILE: &str = r#"Missing "file" in multipart form"#;

/// Upload payload extracted from either a JSON body or a multipart form.
pub struct NormalizedUpload(pub UploadRequest);

/// Byte ceiling for a whole multipart form, summed across every part.
/// Registered as app data; falls back to `DEFAULT_MAX_UPLOAD_BYTES`.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub usize);

impl FromRequest for NormalizedUpload {
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_json(req) {
            let fut = web::Bytes::from_request(req, payload);
            return Box::pin(async move {
                let body = fut.await.map_err(|e| error::Error::bad_request(e.to_string()))?;
                Ok(NormalizedUpload(from_json(&body, now_millis())?))
            });
        }

        if !is_multipart(req) {
            return Box::pin(async move {
                Ok(NormalizedUpload(MultipartFields::default().into_request(now_millis())?))
            });
        }

        let limit = req
            .app_data::<UploadLimit>()
            .copied()
            .unwrap_or(UploadLimit(DEFAULT_MAX_UPLOAD_BYTES));
        let multipart = Multipart::new(req.headers(), payload.take());
        Box::pin(async move {
            let fields = collect_fields(multipart, limit).await?;
            Ok(NormalizedUpload(fields.into_request(now_millis())?))
        })
    }
}

fn content_type(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
}

fn is_json(req: &HttpRequest) -> bool {
    content_type(req).is_some_and(|ct| ct.contains("application/json"))
}

fn is_multipart(req: &HttpRequest) -> bool {
    content_type(req).is_some_and(|ct| ct.trim_start().starts_with("multipart/"))
}

pub fn default_file_name(millis: i64) -> String {
    format!("upload_{millis}.bin")
}

/// JSON path. A body that does not parse is treated as `{}`.
pub fn from_json(body: &[u8], millis: i64) -> Result<UploadRequest, error::SystemError> {
    let value: Value = serde_json::from_slice(body).unwrap_or_else(|e| {
        log::debug!("Upload body is not valid JSON, treating as empty: {}", e);
        Value::Object(Default::default())
    });

    let data = text_field(&value, "file")
        .or_else(|| text_field(&value, "base64"))
        .ok_or_else(|| error::SystemError::bad_request(MISSING_JSON_FILE))?;

    Ok(UploadRequest {
        payload: UploadPayload::Base64(strip_data_url(data).to_string()),
        file_name: text_field(&value, "fileName")
            .map(str::to_string)
            .unwrap_or_else(|| default_file_name(millis)),
        folder: text_field(&value, "folder").unwrap_or(DEFAULT_FOLDER).to_string(),
    })
}

fn text_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilePart {
    /// A part that carried a filename in its content disposition.
    Binary { bytes: Vec<u8>, name: String },
    Text(String),
}

impl FilePart {
    fn is_empty(&self) -> bool {
        match self {
            FilePart::Binary { bytes, .. } => bytes.is_empty(),
            FilePart::Text(text) => text.trim().is_empty(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MultipartFields {
    pub file: Option<FilePart>,
    pub image: Option<FilePart>,
    pub file_name: Option<String>,
    pub folder: Option<String>,
}

impl MultipartFields {
    /// Resolves the collected parts: `file` before `image`, explicit
    /// `fileName` before the part's own filename.
    pub fn into_request(self, millis: i64) -> Result<UploadRequest, error::SystemError> {
        let part = [self.file, self.image]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
            .ok_or_else(|| error::SystemError::bad_request(MISSING_MULTIPART_FILE))?;

        let (payload, inherent_name) = match part {
            FilePart::Binary { bytes, name } => {
                (UploadPayload::Binary(bytes), Some(name).filter(|n| !n.is_empty()))
            }
            FilePart::Text(text) => {
                (UploadPayload::Base64(strip_data_url(text.trim()).to_string()), None)
            }
        };

        let file_name = self
            .file_name
            .filter(|n| !n.is_empty())
            .or(inherent_name)
            .unwrap_or_else(|| default_file_name(millis));

        let folder =
            self.folder.filter(|f| !f.is_empty()).unwrap_or_else(|| DEFAULT_FOLDER.to_string());

        Ok(UploadRequest { payload, file_name, folder })
    }
}

/// Running byte count for one form.
struct ByteBudget {
    limit: usize,
    used: usize,
}

impl ByteBudget {
    fn new(limit: UploadLimit) -> Self {
        ByteBudget { limit: limit.0, used: 0 }
    }

    fn take(&mut self, len: usize) -> Result<(), error::SystemError> {
        self.used = self.used.saturating_add(len);
        if self.used > self.limit {
            return Err(error::SystemError::bad_request(format!(
                "Upload exceeds {} bytes",
                self.limit
            )));
        }
        Ok(())
    }
}

async fn collect_fields(
    mut multipart: Multipart,
    limit: UploadLimit,
) -> Result<MultipartFields, error::SystemError> {
    let mut fields = MultipartFields::default();
    let mut budget = ByteBudget::new(limit);

    while let Some(mut field) = multipart
        .try_next()
        .await
        .map_err(|e| error::SystemError::bad_request(format!("Invalid multipart form: {e}")))?
    {
        let (name, filename) = match field.content_disposition() {
            Some(cd) => {
                (cd.get_name().unwrap_or("").to_string(), cd.get_filename().map(str::to_string))
            }
            None => (String::new(), None),
        };

        let bytes = collect_binary_field(&mut field, &mut budget).await?;
        match name.as_str() {
            "file" | "image" => {
                let part = match filename {
                    Some(filename) => FilePart::Binary { bytes, name: filename },
                    None => FilePart::Text(into_text(bytes, "file")?),
                };
                let slot = if name == "file" { &mut fields.file } else { &mut fields.image };
                if slot.as_ref().is_none_or(FilePart::is_empty) {
                    *slot = Some(part);
                }
            }
            "fileName" => fields.file_name = Some(into_text(bytes, "fileName")?),
            "folder" => fields.folder = Some(into_text(bytes, "folder")?),
            _ => {}
        }
    }

    Ok(fields)
}

fn into_text(bytes: Vec<u8>, field: &str) -> Result<String, error::SystemError> {
    let value = String::from_utf8(bytes).map_err(|_| {
        error::SystemError::bad_request(format!("Field \"{field}\" is not valid UTF-8"))
    })?;
    Ok(value.trim().to_string())
}

async fn collect_binary_field(
    field: &mut Field,
    budget: &mut ByteBudget,
) -> Result<Vec<u8>, error::SystemError> {
    let mut data = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| error::SystemError::bad_request(format!("Failed to read field: {e}")))?
    {
        budget.take(chunk.len())?;
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}
