// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application lifecycle states and the transitions between them.
//!
//! ```text
//! Installed  --deploy-->        Deployed
//! Deployed   --launch-->        Launching   (also from Stopped, Failed)
//! Launching  --mark-running-->  Running
//! Running    --stop-->          Stopping    (also from Launching)
//! Stopping   --mark-stopped-->  Stopped
//! Deployed   --undeploy-->      Installed   (also from Stopped, Failed)
//! ```
//!
//! `Fail` is accepted from any active state.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationState {
    /// Stored in the repository, not known to any peer server
    #[default]
    Installed,
    Deployed,
    Launching,
    Running,
    Stopping,
    Stopped,
    Failed,
}

crate::simple_display! {
    ApplicationState {
        Installed => "installed",
        Deployed => "deployed",
        Launching => "launching",
        Running => "running",
        Stopping => "stopping",
        Stopped => "stopped",
        Failed => "failed",
    }
}

impl ApplicationState {
    /// Whether services of the application may be executing.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ApplicationState::Launching | ApplicationState::Running | ApplicationState::Stopping
        )
    }

    /// Compute the state reached by applying `action`.
    pub fn next(self, action: &LifecycleAction) -> Result<ApplicationState, LifecycleError> {
        use ApplicationState::*;

        let next = match (action, self) {
            (LifecycleAction::Deploy, Installed) => Deployed,
            (LifecycleAction::Launch, Deployed | Stopped | Failed) => Launching,
            (LifecycleAction::MarkRunning, Launching) => Running,
            (LifecycleAction::Stop, Launching | Running) => Stopping,
            (LifecycleAction::MarkStopped, Stopping) => Stopped,
            (LifecycleAction::Fail { .. }, Launching | Running | Stopping) => Failed,
            (LifecycleAction::Undeploy, Deployed | Stopped | Failed) => Installed,
            _ => {
                return Err(LifecycleError::InvalidTransition {
                    from: self,
                    action: action.name(),
                })
            }
        };
        Ok(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LifecycleAction {
    Deploy,
    Launch,
    MarkRunning,
    Stop,
    MarkStopped,
    Fail { reason: String },
    Undeploy,
}

impl LifecycleAction {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleAction::Deploy => "deploy",
            LifecycleAction::Launch => "launch",
            LifecycleAction::MarkRunning => "mark-running",
            LifecycleAction::Stop => "stop",
            LifecycleAction::MarkStopped => "mark-stopped",
            LifecycleAction::Fail { .. } => "fail",
            LifecycleAction::Undeploy => "undeploy",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleAction::Fail { reason } => write!(f, "fail({})", reason),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("cannot {action} an application that is {from}")]
    InvalidTransition { from: ApplicationState, action: &'static str },
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
