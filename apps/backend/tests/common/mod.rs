#![allow(dead_code)]

use actix_web::http::StatusCode;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::test_logging::init();
}

/// Status and decoded JSON body of a response.
pub async fn json_response<B>(resp: actix_web::dev::ServiceResponse<B>) -> (StatusCode, Value)
where
    B: actix_web::body::MessageBody,
{
    let status = resp.status();
    let body: Value = actix_web::test::read_body_json(resp).await;
    (status, body)
}
