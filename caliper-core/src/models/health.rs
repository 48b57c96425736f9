use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational health of one engine component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ready,
    Degraded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn ready(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Ready,
            message: None,
        }
    }

    pub fn degraded(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
        }
    }
}

/// Per-component health summary for the dashboard layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall: HealthStatus,
    pub components: Vec<ComponentHealth>,
    pub generated_at: DateTime<Utc>,
}

impl HealthReport {
    /// Overall status derives worst-wins from the components.
    pub fn from_components(components: Vec<ComponentHealth>) -> Self {
        let overall = if components.iter().any(|c| c.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Ready
        };
        Self {
            overall,
            components,
            generated_at: Utc::now(),
        }
    }
}
