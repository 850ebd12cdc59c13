// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime status snapshots reported by peer servers.

use serde::{Deserialize, Serialize};

use crate::application::ApplicationId;
use crate::lifecycle::ApplicationState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Launching,
    Running,
    Stopping,
    Stopped,
    Failed,
}

crate::simple_display! {
    ServiceStatus {
        Unknown => "unknown",
        Launching => "launching",
        Running => "running",
        Stopping => "stopping",
        Stopped => "stopped",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRuntimeStatus {
    pub application: ApplicationId,
    /// Service instance name
    pub service: String,
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_server: Option<String>,
    /// Epoch ms of the last launch (0 if never launched)
    #[serde(default)]
    pub started_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ServiceRuntimeStatus {
    pub fn new(application: ApplicationId, service: impl Into<String>, status: ServiceStatus) -> Self {
        Self {
            application,
            service: service.into(),
            status,
            peer_server: None,
            started_ms: 0,
            error_message: None,
        }
    }
}

/// Rolled-up view of an application's services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationHealth {
    /// No service status has been reported
    Unknown,
    /// Every service is running
    Healthy,
    /// Some services running, others stopped or unknown
    Degraded,
    /// At least one service is launching or stopping
    Transitioning,
    Stopped,
    Failed,
}

crate::simple_display! {
    ApplicationHealth {
        Unknown => "unknown",
        Healthy => "healthy",
        Degraded => "degraded",
        Transitioning => "transitioning",
        Stopped => "stopped",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRuntimeStatus {
    pub application: ApplicationId,
    pub name: String,
    pub state: ApplicationState,
    #[serde(default)]
    pub services: Vec<ServiceRuntimeStatus>,
}

impl ApplicationRuntimeStatus {
    pub fn health(&self) -> ApplicationHealth {
        let statuses = || self.services.iter().map(|s| s.status);
        if self.services.is_empty() {
            ApplicationHealth::Unknown
        } else if statuses().any(|s| s == ServiceStatus::Failed) {
            ApplicationHealth::Failed
        } else if statuses().all(|s| s == ServiceStatus::Running) {
            ApplicationHealth::Healthy
        } else if statuses().any(|s| matches!(s, ServiceStatus::Launching | ServiceStatus::Stopping)) {
            ApplicationHealth::Transitioning
        } else if statuses().all(|s| s == ServiceStatus::Stopped) {
            ApplicationHealth::Stopped
        } else {
            ApplicationHealth::Degraded
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceRuntimeStatus> {
        self.services.iter().find(|s| s.service == name)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
