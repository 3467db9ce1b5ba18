use actix_web::HttpResponse;
use serde::Serialize;

/// 200 with the standard success envelope.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "data": data,
    }))
}

/// 201 with the standard success envelope.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "data": data,
    }))
}

/// 200 with an acknowledgement message instead of a data payload, used by
/// delete and logout endpoints.
pub fn message(msg: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": msg,
    }))
}
