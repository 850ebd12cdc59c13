// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn fail() -> LifecycleAction {
    LifecycleAction::Fail { reason: "peer lost".to_string() }
}

#[parameterized(
    deploy = { ApplicationState::Installed, LifecycleAction::Deploy, ApplicationState::Deployed },
    launch_deployed = { ApplicationState::Deployed, LifecycleAction::Launch, ApplicationState::Launching },
    relaunch_stopped = { ApplicationState::Stopped, LifecycleAction::Launch, ApplicationState::Launching },
    relaunch_failed = { ApplicationState::Failed, LifecycleAction::Launch, ApplicationState::Launching },
    running = { ApplicationState::Launching, LifecycleAction::MarkRunning, ApplicationState::Running },
    stop_running = { ApplicationState::Running, LifecycleAction::Stop, ApplicationState::Stopping },
    stop_launching = { ApplicationState::Launching, LifecycleAction::Stop, ApplicationState::Stopping },
    stopped = { ApplicationState::Stopping, LifecycleAction::MarkStopped, ApplicationState::Stopped },
    fail_running = { ApplicationState::Running, fail(), ApplicationState::Failed },
    fail_stopping = { ApplicationState::Stopping, fail(), ApplicationState::Failed },
    undeploy_stopped = { ApplicationState::Stopped, LifecycleAction::Undeploy, ApplicationState::Installed },
    undeploy_deployed = { ApplicationState::Deployed, LifecycleAction::Undeploy, ApplicationState::Installed },
)]
fn allowed_transitions(from: ApplicationState, action: LifecycleAction, to: ApplicationState) {
    assert_eq!(from.next(&action).unwrap(), to);
}

#[parameterized(
    launch_installed = { ApplicationState::Installed, LifecycleAction::Launch },
    deploy_twice = { ApplicationState::Deployed, LifecycleAction::Deploy },
    undeploy_running = { ApplicationState::Running, LifecycleAction::Undeploy },
    stop_stopped = { ApplicationState::Stopped, LifecycleAction::Stop },
    fail_installed = { ApplicationState::Installed, fail() },
    running_without_launch = { ApplicationState::Deployed, LifecycleAction::MarkRunning },
)]
fn rejected_transitions(from: ApplicationState, action: LifecycleAction) {
    let err = from.next(&action).unwrap_err();
    assert_eq!(err, LifecycleError::InvalidTransition { from, action: action.name() });
}

#[test]
fn active_states() {
    let active: Vec<_> = [
        ApplicationState::Installed,
        ApplicationState::Deployed,
        ApplicationState::Launching,
        ApplicationState::Running,
        ApplicationState::Stopping,
        ApplicationState::Stopped,
        ApplicationState::Failed,
    ]
    .into_iter()
    .filter(|s| s.is_active())
    .collect();
    assert_eq!(
        active,
        vec![ApplicationState::Launching, ApplicationState::Running, ApplicationState::Stopping]
    );
}

#[test]
fn error_message_names_action_and_state() {
    let err = ApplicationState::Running.next(&LifecycleAction::Undeploy).unwrap_err();
    assert_eq!(err.to_string(), "cannot undeploy an application that is running");
}

#[test]
fn action_serde_is_tagged() {
    let json = serde_json::to_string(&fail()).unwrap();
    assert_eq!(json, r#"{"action":"fail","reason":"peer lost"}"#);
    let parsed: LifecycleAction = serde_json::from_str(r#"{"action":"mark_running"}"#).unwrap();
    assert_eq!(parsed, LifecycleAction::MarkRunning);
}
