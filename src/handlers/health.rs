//! Health check and service info handlers

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    status: &'static str,
    message: &'static str,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// Service banner at `/`
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "IssueFlow API",
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        message: "Welcome to IssueFlow! POST /issues to classify and store a report",
    })
}
