use actix_web::{web, HttpRequest};

use crate::api::{error, success};
use crate::modules::image::model::{AuthParams, DeleteResponse, ListParams, PublicFile};
use crate::modules::image::normalize::NormalizedUpload;
use crate::modules::image::service::ImageService;

fn file_id(req: &HttpRequest) -> &str {
    req.match_info().get("file_id").unwrap_or_default()
}

/// Signature material for client-side uploads
pub async fn auth_params(
    service: web::Data<ImageService>,
) -> Result<success::Success<AuthParams>, error::Error> {
    let params = service.auth_params()?;
    Ok(success::Success::ok(params))
}

pub async fn list_images(
    service: web::Data<ImageService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<success::Success<Vec<PublicFile>>, error::Error> {
    let params = ListParams::from_pairs(query.into_inner());
    let files = service.list(params.into()).await?;
    Ok(success::Success::ok(files))
}

pub async fn get_image(
    service: web::Data<ImageService>,
    req: HttpRequest,
) -> Result<success::Success<PublicFile>, error::Error> {
    let file = service.get_by_id(file_id(&req)).await?;
    Ok(success::Success::ok(file))
}

pub async fn upload_image(
    service: web::Data<ImageService>,
    upload: NormalizedUpload,
) -> Result<success::Success<PublicFile>, error::Error> {
    let file = service.upload(upload.0).await?;
    Ok(success::Success::created(file))
}

pub async fn delete_image(
    service: web::Data<ImageService>,
    req: HttpRequest,
) -> Result<success::Success<DeleteResponse>, error::Error> {
    let deleted = service.delete(file_id(&req)).await?;
    Ok(success::Success::ok(deleted))
}
