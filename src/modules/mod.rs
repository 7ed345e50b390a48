pub mod image {
    pub mod schema;
    pub mod model;
    pub mod gateway;
    pub mod gateway_imagekit;
    pub mod normalize;
    pub mod handle;
    pub mod service;
    pub mod route;
}
