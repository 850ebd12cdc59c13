// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    let s = styles();
    let debug = format!("{:?}", s);
    std::env::remove_var("COLOR");
    assert_ne!(debug, format!("{:?}", clap::builder::styling::Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");

    let s = styles();
    let debug = format!("{:?}", s);
    std::env::remove_var("NO_COLOR");
    assert_eq!(debug, format!("{:?}", clap::builder::styling::Styles::plain()));
}

#[test]
#[serial]
fn no_color_leaves_text_untouched() {
    std::env::set_var("NO_COLOR", "1");
    assert_eq!(header("NAME"), "NAME");
    assert_eq!(state("running"), "running");
    std::env::remove_var("NO_COLOR");
}

#[test]
#[serial]
fn forced_color_wraps_in_ansi_codes() {
    std::env::remove_var("NO_COLOR");
    std::env::set_var("COLOR", "1");
    assert_eq!(state("failed"), "\x1b[38;5;167mfailed\x1b[0m");
    assert_eq!(muted("x"), "\x1b[38;5;240mx\x1b[0m");
    std::env::remove_var("COLOR");
}
