use serde::{Deserialize, Serialize};

/// File record as returned by the provider. Field names drift between
/// endpoints, so every consumed field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RawFile {
    #[serde(rename = "fileId", skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "fileType", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "thumbnailUrl", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl RawFile {
    /// `fileId`, then `id`.
    pub fn identifier(&self) -> Option<&str> {
        self.file_id.as_deref().or(self.id.as_deref())
    }

    /// `fileType`, then `mime`.
    pub fn kind(&self) -> Option<&str> {
        self.file_type.as_deref().or(self.mime.as_deref())
    }

    /// `thumbnail`, then `thumbnailUrl`.
    pub fn thumbnail_link(&self) -> Option<&str> {
        self.thumbnail.as_deref().or(self.thumbnail_url.as_deref())
    }
}

/// Error payload the provider sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub message: Option<String>,
}
