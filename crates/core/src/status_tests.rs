// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn snapshot(statuses: &[ServiceStatus]) -> ApplicationRuntimeStatus {
    let app = ApplicationId::from_string("app-orders");
    ApplicationRuntimeStatus {
        application: app.clone(),
        name: "Orders".to_string(),
        state: ApplicationState::Running,
        services: statuses
            .iter()
            .enumerate()
            .map(|(i, s)| ServiceRuntimeStatus::new(app.clone(), format!("svc{i}"), *s))
            .collect(),
    }
}

#[parameterized(
    empty = { &[], ApplicationHealth::Unknown },
    all_running = { &[ServiceStatus::Running, ServiceStatus::Running], ApplicationHealth::Healthy },
    one_failed = { &[ServiceStatus::Running, ServiceStatus::Failed, ServiceStatus::Launching], ApplicationHealth::Failed },
    launching = { &[ServiceStatus::Running, ServiceStatus::Launching], ApplicationHealth::Transitioning },
    stopping = { &[ServiceStatus::Stopped, ServiceStatus::Stopping], ApplicationHealth::Transitioning },
    all_stopped = { &[ServiceStatus::Stopped, ServiceStatus::Stopped], ApplicationHealth::Stopped },
    mixed = { &[ServiceStatus::Running, ServiceStatus::Stopped], ApplicationHealth::Degraded },
    unknown_member = { &[ServiceStatus::Running, ServiceStatus::Unknown], ApplicationHealth::Degraded },
)]
fn health_rollup(statuses: &[ServiceStatus], expected: ApplicationHealth) {
    assert_eq!(snapshot(statuses).health(), expected);
}

#[test]
fn service_lookup_by_name() {
    let status = snapshot(&[ServiceStatus::Running, ServiceStatus::Stopped]);
    assert_eq!(status.service("svc1").map(|s| s.status), Some(ServiceStatus::Stopped));
    assert!(status.service("svc9").is_none());
}
