// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

fn installed() -> (Project, String) {
    let temp = Project::empty();
    temp.file("flow.json", ORDER_FLOW);
    let id = temp.add("flow.json");
    (temp, id)
}

#[test]
fn added_resources_are_listed_sorted() {
    let (temp, id) = installed();
    temp.file("order.xsl", "<xsl/>");
    temp.file("schema.xsd", "<xsd/>");

    temp.dmictl().args(&["resource", "add", &id, "xsl/order.xsl", "order.xsl"]).passes();
    temp.dmictl().args(&["resource", "add", &id, "schema.xsd", "schema.xsd"]).passes();

    temp.dmictl()
        .args(&["resource", "list", &id])
        .passes()
        .stdout_eq("schema.xsd\nxsl/order.xsl\n");
}

#[test]
fn removed_resource_is_gone() {
    let (temp, id) = installed();
    temp.file("order.xsl", "<xsl/>");
    temp.dmictl().args(&["resource", "add", &id, "order.xsl", "order.xsl"]).passes();
    temp.dmictl().args(&["resource", "rm", &id, "order.xsl"]).passes();

    temp.dmictl().args(&["resource", "list", &id]).passes().stdout_eq("No resources\n");
    temp.dmictl().args(&["resource", "cat", &id, "order.xsl"]).exits_with(3);
}

#[test]
fn escaping_paths_are_rejected() {
    let (temp, id) = installed();
    temp.file("evil.txt", "x");
    temp.dmictl()
        .args(&["resource", "add", &id, "../evil.txt", "evil.txt"])
        .exits_with(1)
        .stderr_has("../evil.txt");
}
