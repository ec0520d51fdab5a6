use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
    })
}
