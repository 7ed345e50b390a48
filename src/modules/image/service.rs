use log::info;
use std::sync::Arc;

use crate::api::error;
use crate::modules::image::gateway::MediaGateway;
use crate::modules::image::model::{
    AuthParams, DeleteResponse, ListOptions, PublicFile, UploadRequest,
};

#[derive(Clone)]
pub struct ImageService {
    gateway: Arc<dyn MediaGateway + Send + Sync>,
}

impl ImageService {
    pub fn with_dependencies(gateway: Arc<dyn MediaGateway + Send + Sync>) -> Self {
        info!("ImageService initialized with dependencies");
        ImageService { gateway }
    }

    pub fn auth_params(&self) -> Result<AuthParams, error::SystemError> {
        self.gateway.auth_params()
    }

    pub async fn upload(&self, request: UploadRequest) -> Result<PublicFile, error::SystemError> {
        info!("Uploading {} to {}", request.file_name, request.folder);
        let raw = self.gateway.upload(request).await?;
        Ok(PublicFile::from(raw))
    }

    pub async fn list(&self, options: ListOptions) -> Result<Vec<PublicFile>, error::SystemError> {
        let files = self.gateway.list(&options).await?;
        Ok(files.into_iter().map(PublicFile::from).collect())
    }

    pub async fn get_by_id(&self, file_id: &str) -> Result<PublicFile, error::SystemError> {
        let file_id = require_id(file_id)?;
        let raw = self.gateway.details(file_id).await?;
        Ok(PublicFile::from(raw))
    }

    pub async fn delete(&self, file_id: &str) -> Result<DeleteResponse, error::SystemError> {
        let file_id = require_id(file_id)?;
        self.gateway.delete(file_id).await?;
        info!("File {} deleted", file_id);
        Ok(DeleteResponse { success: true, id: file_id.to_string() })
    }
}

/// Blank ids are rejected; anything else is passed through untouched.
fn require_id(file_id: &str) -> Result<&str, error::SystemError> {
    if file_id.trim().is_empty() {
        return Err(error::SystemError::bad_request("Missing fileId"));
    }
    Ok(file_id)
}
