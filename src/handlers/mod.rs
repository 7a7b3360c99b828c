pub mod products;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Liveness probe. Fixed compact payload, no catalog involved.
pub async fn heartbeat() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "message": "I'm alive!" })))
}

/// Pretty-printed JSON responder. Catalog payloads go over the wire indented;
/// axum's own `Json` stays compact, so this mirrors it with
/// `to_vec_pretty` instead.
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
