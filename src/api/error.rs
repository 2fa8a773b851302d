use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use super::models::ApiResponse;
use crate::error::LedgerError;

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(self.to_string()))
    }
}

/// 400 with the standard failure envelope, for malformed requests.
pub fn bad_request(error: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::failure(error))
}
