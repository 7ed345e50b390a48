use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use crate::{
    configs::ImageKitConfig,
    modules::image::{
        gateway_imagekit::ImageKitGateway, normalize::UploadLimit, service::ImageService,
    },
};

mod api;
mod configs;
mod constants;
mod modules;
mod utils;

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "ok"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let env = constants::Env::from_env().map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!("Environment variables loaded");

    let config = ImageKitConfig::from_env(&env).map_err(|e| std::io::Error::other(e.to_string()))?;
    let gateway = ImageKitGateway::new(config)
        .map_err(|e| std::io::Error::other(format!("ImageKit client error: {e}")))?;
    log::info!(
        "ImageKit gateway ready (public key {}, endpoint {})",
        gateway.config().public_key,
        gateway.config().url_endpoint
    );

    let image_service = ImageService::with_dependencies(Arc::new(gateway));
    let max_upload_bytes = env.max_upload_bytes;

    log::info!("Starting server at http://{}:{}", env.ip, env.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .app_data(UploadLimit(max_upload_bytes))
            .app_data(web::Data::new(image_service.clone()))
            .service(health_check)
            .configure(modules::image::route::configure)
    })
    .bind((env.ip.as_str(), env.port))?
    .run()
    .await
}
