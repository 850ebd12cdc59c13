// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dmictl app` specs: installing, transitioning and moving applications.

use crate::prelude::*;

#[test]
fn empty_repository_lists_nothing() {
    let temp = Project::empty();
    temp.dmictl().args(&["app", "list"]).passes().stdout_eq("No applications installed\n");
}

#[test]
fn added_application_is_listed_and_shown() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");

    temp.dmictl()
        .args(&["app", "list"])
        .passes()
        .stdout_has("NAME")
        .stdout_has("OrderFlow")
        .stdout_has("installed");

    temp.dmictl()
        .args(&["app", "show", &id])
        .passes()
        .stdout_has("Application: OrderFlow")
        .stdout_has("feed: feeder.OUT_PORT -> display.IN_PORT");
}

#[test]
fn show_accepts_a_unique_id_prefix() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");
    let prefix = &id["app-".len().."app-".len() + 6];

    temp.dmictl().args(&["app", "show", prefix]).passes().stdout_has(&id);
}

#[test]
fn missing_application_exits_not_found() {
    let temp = Project::empty();
    temp.dmictl()
        .args(&["app", "show", "app-nope"])
        .exits_with(3)
        .stderr_has("application not found");
}

#[test]
fn duplicate_name_is_a_conflict() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    temp.add("flow.json");
    temp.dmictl().args(&["app", "add", "flow.json"]).exits_with(4);
}

#[test]
fn invalid_definition_fails() {
    let temp = Project::empty();
    temp.file("bad.json", r#"{ "name": "" }"#);
    temp.dmictl().args(&["app", "add", "bad.json"]).exits_with(1);
}

#[test]
fn full_lifecycle_round_trip() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");

    for (command, state) in [
        ("deploy", "deployed"),
        ("launch", "launching"),
        ("running", "running"),
        ("stop", "stopping"),
        ("stopped", "stopped"),
        ("undeploy", "installed"),
    ] {
        temp.dmictl().args(&["app", command, &id]).passes().stdout_has(&format!("-> {state}"));
    }
}

#[test]
fn invalid_transition_is_a_conflict() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");
    temp.dmictl().args(&["app", "launch", &id]).exits_with(4).stderr_has("installed");
}

#[test]
fn failure_reason_is_recorded() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");
    temp.dmictl().args(&["app", "deploy", &id]).passes();
    temp.dmictl().args(&["app", "launch", &id]).passes();
    temp.dmictl().args(&["app", "fail", &id, "feeder crashed"]).passes();

    let run = temp.dmictl().args(&["-o", "json", "app", "show", &id]).passes();
    let app = run.json();
    assert_eq!(app["state"], "failed");
    assert_eq!(app["last_error"], "feeder crashed");
}

#[test]
fn running_application_needs_force_to_remove() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");
    for command in ["deploy", "launch", "running"] {
        temp.dmictl().args(&["app", command, &id]).passes();
    }

    temp.dmictl().args(&["app", "remove", &id]).exits_with(4).stderr_has("running");
    temp.dmictl().args(&["app", "remove", &id, "--force"]).passes().stdout_has("Removed");
    temp.dmictl().args(&["app", "list"]).passes().stdout_lacks("OrderFlow");
}

#[test]
fn copy_installs_a_second_application() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");

    temp.dmictl().args(&["app", "copy", &id, "OrderFlowCopy"]).passes().stdout_has("OrderFlowCopy");

    let run = temp.dmictl().args(&["-o", "json", "app", "list"]).passes();
    let names: Vec<String> = run.json().as_array().unwrap().iter().map(|a| a["name"].as_str().unwrap().to_string()).collect();
    assert_eq!(names, ["OrderFlow", "OrderFlowCopy"]);
}

#[test]
fn export_then_import_into_another_repository() {
    let source = Project::empty();
    source.file("flow.json", ORDER_FLOW);
    source.file("res/xsl/order.xsl", "<xsl:stylesheet/>");
    let run = source
        .dmictl()
        .args(&["-o", "json", "app", "add", "flow.json", "--resources", "res"])
        .passes();
    let id = run.json()["id"].as_str().unwrap().to_string();

    source.dmictl().args(&["app", "export", &id, "flow.dmia"]).passes().stdout_has("Exported");

    let target = Project::empty();
    target.file("flow.dmia", source.read("flow.dmia"));
    target.dmictl().args(&["app", "import", "flow.dmia"]).passes().stdout_has(&id);
    target
        .dmictl()
        .args(&["resource", "cat", &id, "xsl/order.xsl"])
        .passes()
        .stdout_eq("<xsl:stylesheet/>");

    // A second import of the same id needs --replace.
    target.dmictl().args(&["app", "import", "flow.dmia"]).exits_with(4);
    target.dmictl().args(&["app", "import", "flow.dmia", "--replace"]).passes();
}

#[test]
fn export_reports_json_summary() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");

    let run = temp.dmictl().args(&["-o", "json", "app", "export", &id, "flow.dmia"]).passes();
    let json = run.json();
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["name"], "OrderFlow");
    assert_eq!(json["file"], "flow.dmia");
    assert_eq!(json["bytes"].as_u64(), Some(temp.read("flow.dmia").len() as u64));
    run.stdout_lacks("Exported");
}
