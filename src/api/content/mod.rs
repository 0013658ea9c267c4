pub mod handlers;

use actix_cors::Cors;
use actix_web::{http::header, web, Scope};

/// Read-only CORS policy for the content listing, which is consumed directly
/// by browser front ends.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_header(header::ORIGIN)
        .expose_headers(vec![header::CONTENT_LENGTH])
        .supports_credentials()
        .max_age(12 * 60 * 60)
}

pub fn routes() -> Scope<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    web::scope("/content")
        .wrap(cors())
        .service(handlers::list_content)
}
