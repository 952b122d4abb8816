use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

/// Error code the client uses to tell a duplicate title apart from other 400s.
pub const DUPLICATE_TITLE_CODE: u16 = 3;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Json(serde_json::Error),
    NotFound,
    DuplicateTitle,
    BadRequest(String),
}

/// JSON error body returned by every API endpoint.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Json(e) => write!(f, "Stored document error: {e}"),
            AppError::NotFound => write!(f, "Form not found"),
            AppError::DuplicateTitle => write!(f, "Form Already present use another name"),
            AppError::BadRequest(reason) => write!(f, "{reason}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateTitle | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::DuplicateTitle => ApiErrorResponse {
                message: self.to_string(),
                code: Some(DUPLICATE_TITLE_CODE),
            },
            AppError::NotFound | AppError::BadRequest(_) => ApiErrorResponse {
                message: self.to_string(),
                code: None,
            },
            AppError::Db(_) | AppError::Json(_) => {
                log::error!("{self}");
                ApiErrorResponse {
                    message: "Server Error".to_string(),
                    code: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateTitle.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BadRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Db(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_title_body_carries_code() {
        let body = ApiErrorResponse {
            message: AppError::DuplicateTitle.to_string(),
            code: Some(DUPLICATE_TITLE_CODE),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 3);
        assert_eq!(json["message"], "Form Already present use another name");
    }

    #[test]
    fn plain_errors_omit_code() {
        let body = ApiErrorResponse {
            message: AppError::NotFound.to_string(),
            code: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("code").is_none());
        assert_eq!(json["message"], "Form not found");
    }
}
