use crate::{
    api::error,
    modules::image::{
        model::{AuthParams, ListOptions, UploadRequest},
        schema::RawFile,
    },
};

/// Remote media provider. Every call goes straight to the provider; nothing
/// is cached or retried here.
#[async_trait::async_trait]
pub trait MediaGateway {
    fn auth_params(&self) -> Result<AuthParams, error::SystemError>;

    async fn upload(&self, request: UploadRequest) -> Result<RawFile, error::SystemError>;

    /// Order of the returned files is provider-defined.
    async fn list(&self, options: &ListOptions) -> Result<Vec<RawFile>, error::SystemError>;

    async fn details(&self, file_id: &str) -> Result<RawFile, error::SystemError>;

    async fn delete(&self, file_id: &str) -> Result<(), error::SystemError>;
}
