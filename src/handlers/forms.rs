use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::form::{self, FormRequest};
use crate::models::response::MessageResponse;

/// GET /api/forms - All forms, most recently updated first
pub async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let forms = form::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(forms))
}

/// GET /api/forms/{id}
pub async fn read(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let form_id = path.into_inner();
    let found = form::find_by_id(&pool, form_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(found))
}

/// POST /api/forms - Create a form; 400 with code 3 when the title is taken
pub async fn create(
    pool: web::Data<DbPool>,
    body: web::Json<FormRequest>,
) -> Result<HttpResponse, AppError> {
    let created = form::create(&pool, &body).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/forms/{id} - Replace title and/or inputs
pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    body: web::Json<FormRequest>,
) -> Result<HttpResponse, AppError> {
    let form_id = path.into_inner();
    let updated = form::update(&pool, form_id, &body).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/forms/{id} - Delete a form and all of its responses
pub async fn delete(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let form_id = path.into_inner();
    form::delete(&pool, form_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Form deleted successfully")))
}
