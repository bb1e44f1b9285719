use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

/// Hard deadline for the health probe.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Online/offline verdict for the backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendStatus {
    pub is_online: bool,
    pub last_checked: DateTime<Utc>,
    pub error: Option<String>,
}

impl BackendStatus {
    fn online() -> Self {
        Self {
            is_online: true,
            last_checked: Utc::now(),
            error: None,
        }
    }

    fn offline(error: String) -> Self {
        Self {
            is_online: false,
            last_checked: Utc::now(),
            error: Some(error),
        }
    }
}

/// Probe `GET {base_url}/health` once. Never fails: every non-2xx status,
/// network error, or timeout resolves to an offline verdict carrying the
/// cause. Callers invoke this on demand or on their own timer.
pub async fn check_backend_status(client: &Client, base_url: &str) -> BackendStatus {
    let url = format!("{base_url}/health");
    debug!(%url, "probing backend health");

    let result = client
        .get(&url)
        .header("Content-Type", "application/json")
        .timeout(STATUS_TIMEOUT)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => BackendStatus::online(),
        Ok(response) => {
            let status = response.status();
            BackendStatus::offline(format!(
                "Server returned {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))
        }
        Err(e) => BackendStatus::offline(e.to_string()),
    }
}
