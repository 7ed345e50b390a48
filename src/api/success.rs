use actix_web::HttpResponse;

pub struct Success<T: serde::Serialize> {
    pub status: actix_web::http::StatusCode,
    pub body: T,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(body: T) -> Self {
        Self { status: actix_web::http::StatusCode::OK, body }
    }

    pub fn created(body: T) -> Self {
        Self { status: actix_web::http::StatusCode::CREATED, body }
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(self.body)
    }
}
