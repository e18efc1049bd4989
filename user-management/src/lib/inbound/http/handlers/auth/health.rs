use chrono::Utc;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;

const SERVICE_NAME: &str = "User Management Authentication Service";

pub async fn health() -> ApiSuccess<HealthResponseData> {
    ApiSuccess::ok(HealthResponseData {
        status: "UP",
        service: SERVICE_NAME,
        timestamp: Utc::now().timestamp_millis(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: &'static str,
    pub service: &'static str,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}
