use serde_json::{json, Value};
use service_core::axum::{extract::State, Json};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.config.service_name,
        "version": state.config.service_version,
    }))
}
