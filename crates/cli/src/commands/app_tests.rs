// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dmi_core::test_support::order_flow;
use dmi_core::ApplicationState;
use serial_test::serial;

fn id(s: &str) -> String {
    s.to_string()
}

#[yare::parameterized(
    deploy = { AppCommand::Deploy { id: id("a") }, LifecycleAction::Deploy },
    launch = { AppCommand::Launch { id: id("a") }, LifecycleAction::Launch },
    running = { AppCommand::Running { id: id("a") }, LifecycleAction::MarkRunning },
    stop = { AppCommand::Stop { id: id("a") }, LifecycleAction::Stop },
    stopped = { AppCommand::Stopped { id: id("a") }, LifecycleAction::MarkStopped },
    undeploy = { AppCommand::Undeploy { id: id("a") }, LifecycleAction::Undeploy },
    fail = { AppCommand::Fail { id: id("a"), reason: id("oom") }, LifecycleAction::Fail { reason: id("oom") } },
)]
fn transition_subcommands_map_to_actions(command: AppCommand, action: LifecycleAction) {
    assert_eq!(command.transition(), Some(("a", action)));
}

#[test]
fn other_subcommands_are_not_transitions() {
    assert_eq!(AppCommand::List {}.transition(), None);
    assert_eq!(AppCommand::Show { id: id("a") }.transition(), None);
}

#[test]
#[serial]
fn rows_show_short_ids_and_service_counts() {
    std::env::set_var("NO_COLOR", "1");
    let app = order_flow();
    let rows = rows(std::slice::from_ref(&app));
    std::env::remove_var("NO_COLOR");

    assert_eq!(rows[0][0], app.id.short(SHORT_ID));
    assert_eq!(rows[0][1..5], ["OrderFlow", "1.0", "installed", "3"]);
    assert_eq!(rows[0][5], "-");
}

#[test]
#[serial]
fn show_lists_services_routes_and_resources() {
    std::env::set_var("NO_COLOR", "1");
    let mut app = order_flow();
    app.state = ApplicationState::Failed;
    app.last_error = Some("feeder crashed".to_string());
    let mut out = Vec::new();
    print_application(&mut out, &app, &["xsl/order.xsl".to_string()]).unwrap();
    std::env::remove_var("NO_COLOR");

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Application: OrderFlow\n"), "{text}");
    assert!(text.contains("  state: failed\n"), "{text}");
    assert!(text.contains("  last error: feeder crashed\n"), "{text}");
    assert!(text.contains("    OUT_PORT output orders.feeder.out\n"), "{text}");
    assert!(text.contains("  feed: feeder.OUT_PORT -> transformer.IN_PORT\n"), "{text}");
    assert!(text.contains("  show: transformer.OUT_PORT -> display.IN_PORT [priority > 3]\n"), "{text}");
    assert!(text.ends_with("Resources:\n  xsl/order.xsl\n"), "{text}");
}
