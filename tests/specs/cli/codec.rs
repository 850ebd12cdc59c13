// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dmictl encode`, `decode` and `types`

use crate::prelude::*;

#[test]
fn encode_then_decode_as_json() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    temp.dmictl().args(&["encode", "flow.json", "flow.dmi"]).passes().stdout_has("as v3");

    let run = temp.dmictl().args(&["-o", "json", "decode", "flow.dmi"]).passes();
    let decoded = run.json();
    assert_eq!(decoded["version"], 3);
    assert_eq!(decoded["tag"], 1);
    assert_eq!(decoded["type"], "application");
    assert_eq!(decoded["object"]["name"], "OrderFlow");
    assert_eq!(decoded["object"]["description"], "Routes purchase orders");
}

#[test]
fn older_versions_drop_newer_fields() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    temp.dmictl().args(&["encode", "flow.json", "flow.dmi", "--version", "1"]).passes();

    let run = temp.dmictl().args(&["-o", "json", "decode", "flow.dmi"]).passes();
    let decoded = run.json();
    assert_eq!(decoded["version"], 1);
    assert_eq!(decoded["object"]["description"], "");
}

#[test]
fn config_protocol_version_is_the_default() {
    let temp = Project::empty();
    temp.file("config.toml", "protocol_version = 2\n");
    temp.file("flow.json", ORDER_FLOW);
    temp.dmictl().args(&["encode", "flow.json", "flow.dmi"]).passes().stdout_has("as v2");
}

#[test]
fn unsupported_version_is_refused() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    temp.dmictl()
        .args(&["encode", "flow.json", "flow.dmi", "--version", "9"])
        .fails()
        .stderr_has("unsupported protocol_version 9");
}

#[test]
fn decode_text_shows_header_line() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    temp.dmictl().args(&["encode", "flow.json", "flow.dmi", "--version", "2"]).passes();
    temp.dmictl()
        .args(&["decode", "flow.dmi"])
        .passes()
        .stdout_has("application(1) v2")
        .stdout_has("\"name\": \"OrderFlow\"");
}

#[test]
fn decode_reads_exported_archives() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");
    temp.dmictl().args(&["app", "export", &id, "flow.dmia"]).passes();

    let run = temp.dmictl().args(&["-o", "json", "decode", "flow.dmia"]).passes();
    let decoded = run.json();
    assert_eq!(decoded["compressed"], true);
    assert_eq!(decoded["type"], "archive");
    assert_eq!(decoded["object"]["application"]["id"], id.as_str());
}

#[test]
fn decode_rejects_non_dmi_files() {
    let temp = Project::empty();
    temp.file("notes.txt", "hello world");
    temp.dmictl().args(&["decode", "notes.txt"]).exits_with(1).stderr_has("notes.txt");
}

#[test]
fn types_lists_the_registry() {
    cli()
        .args(&["types"])
        .passes()
        .stdout_has("TAG")
        .stdout_has("application")
        .stdout_has("object_list");
}
