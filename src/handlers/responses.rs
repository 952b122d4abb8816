use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::response::{self, MessageResponse, SubmitRequest};

/// POST /api/forms/{id}/submit - Store one submission
pub async fn submit(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    body: web::Json<SubmitRequest>,
) -> Result<HttpResponse, AppError> {
    let form_id = path.into_inner();
    response::submit(&pool, form_id, &body.form_data).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Form submitted successfully")))
}

/// GET /api/forms/{id}/responses - Submissions for a form, newest first
pub async fn list(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let form_id = path.into_inner();
    let responses = response::find_for_form(&pool, form_id).await?;
    Ok(HttpResponse::Ok().json(responses))
}
