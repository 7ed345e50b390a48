use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::modules::image::schema::RawFile;
use crate::utils::{clean_url, parse_leading_int};

/// Public file representation returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicFile {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl From<RawFile> for PublicFile {
    fn from(raw: RawFile) -> Self {
        PublicFile {
            id: raw.identifier().unwrap_or_default().to_string(),
            filetype: raw.kind().map(str::to_string),
            thumbnail: raw.thumbnail_link().map(str::to_string),
            url: clean_url(raw.url.as_deref().unwrap_or_default()),
            name: raw.name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthParams {
    pub token: String,
    pub expire: i64,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPayload {
    Binary(Vec<u8>),
    Base64(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub payload: UploadPayload,
    pub file_name: String,
    pub folder: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileTypeFilter {
    All,
    Image,
    NonImage,
    Video,
}

impl FileTypeFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(Self::All),
            "image" => Some(Self::Image),
            "non-image" => Some(Self::NonImage),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Image => "image",
            Self::NonImage => "non-image",
            Self::Video => "video",
        }
    }
}

/// Raw query string of `GET /images`, before any bounds are applied.
#[derive(Debug, Default)]
pub struct ListParams {
    pub limit: Option<String>,
    pub skip: Option<String>,
    pub folder: Option<String>,
    pub path: Option<String>,
    pub file_type: Option<String>,
}

impl ListParams {
    /// Builds from decoded query pairs. The first occurrence of a key wins;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "skip" => &mut params.skip,
                "folder" => &mut params.folder,
                "path" => &mut params.path,
                "fileType" => &mut params.file_type,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    pub limit: u32,
    pub skip: u64,
    pub path: Option<String>,
    pub file_type: Option<FileTypeFilter>,
}

impl From<ListParams> for ListOptions {
    fn from(params: ListParams) -> Self {
        let limit = params
            .limit
            .as_deref()
            .and_then(parse_leading_int)
            .map(|n| n.clamp(1, MAX_LIST_LIMIT))
            .unwrap_or(DEFAULT_LIST_LIMIT);

        let skip = params.skip.as_deref().and_then(parse_leading_int).map(|n| n.max(0)).unwrap_or(0);

        let path = [params.folder, params.path].into_iter().flatten().find(|p| !p.is_empty());

        let file_type = params.file_type.as_deref().and_then(FileTypeFilter::parse);

        ListOptions { limit: limit as u32, skip: skip as u64, path, file_type }
    }
}
