// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file and environment resolution specs

use crate::prelude::*;

#[test]
fn repository_flag_overrides_environment() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let other = temp.path().join("other");
    let other = other.to_str().unwrap();

    temp.dmictl().args(&["--repository", other, "app", "add", "flow.json"]).passes();
    temp.dmictl().args(&["--repository", other, "app", "list"]).passes().stdout_has("OrderFlow");
    temp.dmictl().args(&["app", "list"]).passes().stdout_lacks("OrderFlow");
}

#[test]
fn config_repository_is_relative_to_the_config_file() {
    let temp = Project::empty();
    temp.file("etc/config.toml", "repository = \"../shared\"\n");
    temp.file("flow.json", ORDER_FLOW);
    let config = temp.path().join("etc/config.toml");

    cli()
        .current_dir(temp.path())
        .env("DMI_CONFIG", &config)
        .env_remove("DMI_REPOSITORY")
        .args(&["app", "add", "flow.json"])
        .passes();
    assert!(temp.path().join("shared/applications").is_dir());
}

#[test]
fn unknown_config_keys_are_errors() {
    let temp = Project::empty();
    temp.file("config.toml", "colour = true\n");
    temp.dmictl().args(&["app", "list"]).exits_with(1).stderr_has("config.toml");
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = Project::empty();
    temp.dmictl().args(&["--config", "nope.toml", "app", "list"]).fails().stderr_has("nope.toml");
}

#[test]
fn verbose_logs_to_stderr() {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    temp.dmictl()
        .args(&["-v", "app", "add", "flow.json"])
        .passes()
        .stderr_has("installed application");
}
