// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn dmictl_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn dmictl_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("app")
        .stdout_has("resource")
        .stdout_has("decode")
        .stdout_has("encode")
        .stdout_has("types");
}

#[test]
fn dmictl_app_help_shows_subcommands() {
    cli()
        .args(&["app", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("import")
        .stdout_has("launch")
        .stdout_has("undeploy");
}

#[test]
fn dmictl_resource_help_shows_subcommands() {
    cli().args(&["resource", "--help"]).passes().stdout_has("add").stdout_has("rm");
}

#[test]
fn dmictl_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_command_is_a_usage_error() {
    cli().args(&["frobnicate"]).exits_with(2).stderr_has("frobnicate");
}
