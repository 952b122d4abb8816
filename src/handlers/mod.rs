pub mod forms;
pub mod responses;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::{Next, from_fn},
    web,
};

use crate::errors::{AppError, ApiErrorResponse};

/// Rejects POST/PUT requests whose Content-Type is not JSON.
/// GET and DELETE carry no body and pass through.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::BadRequest().json(ApiErrorResponse {
                message: "Content-Type must be application/json".to_string(),
                code: None,
            });
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Malformed JSON bodies become a JSON 400 instead of actix's plain-text one.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid request body: {err}")).into())
}

/// A path id that is not a number cannot name a form.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| AppError::NotFound.into())
}

/// Configure the form API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(path_config());
    cfg.service(
        web::scope("/api/forms")
            .wrap(from_fn(require_json_content_type))
            .route("", web::get().to(forms::list))
            .route("", web::post().to(forms::create))
            .route("/{id}", web::get().to(forms::read))
            .route("/{id}", web::put().to(forms::update))
            .route("/{id}", web::delete().to(forms::delete))
            .route("/{id}/submit", web::post().to(responses::submit))
            .route("/{id}/responses", web::get().to(responses::list)),
    );
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse {
        message: "Route not found".to_string(),
        code: None,
    })
}
