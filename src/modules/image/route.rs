use actix_web::web;

use crate::modules::image::handle::*;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/imagekit-auth").route(web::get().to(auth_params)))
        .service(
            web::resource("/images")
                .route(web::get().to(list_images))
                .route(web::post().to(upload_image)),
        )
        // bare trailing slash has no id; handlers answer 400
        .service(
            web::resource(["/images/", "/images/{file_id}"])
                .route(web::get().to(get_image))
                .route(web::delete().to(delete_image)),
        );
}
