// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn put_read_and_list_resources() {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    let id = id.as_str();

    f.repo.put_resource(id, "xsl/order.xsl", b"<xsl/>").unwrap();
    f.repo.put_resource(id, "descriptor.xml", b"<app/>").unwrap();
    assert_eq!(f.repo.resources(id).unwrap(), vec!["descriptor.xml", "xsl/order.xsl"]);
    assert_eq!(f.repo.read_resource(id, "xsl/order.xsl").unwrap(), b"<xsl/>");

    f.repo.put_resource(id, "xsl/order.xsl", b"<xsl version=\"2\"/>").unwrap();
    assert_eq!(f.repo.read_resource(id, "./xsl/order.xsl").unwrap(), b"<xsl version=\"2\"/>");
}

#[test]
fn put_keeps_resource_named_like_a_temp_file() {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    let id = id.as_str();

    f.repo.put_resource(id, "order.xsl.tmp", b"keep me").unwrap();
    f.repo.put_resource(id, "order.xsl", b"new").unwrap();

    assert_eq!(f.repo.resources(id).unwrap(), vec!["order.xsl", "order.xsl.tmp"]);
    assert_eq!(f.repo.read_resource(id, "order.xsl.tmp").unwrap(), b"keep me");
    assert_eq!(f.repo.read_resource(id, "order.xsl").unwrap(), b"new");
}

#[test]
fn resource_changes_bump_modified_time() {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    f.clock.advance(Duration::from_millis(250));
    f.repo.put_resource(id.as_str(), "a.txt", b"a").unwrap();
    assert_eq!(f.repo.get(id.as_str()).unwrap().modified_ms, 1_000_250);

    f.clock.advance(Duration::from_millis(250));
    f.repo.delete_resource(id.as_str(), "a.txt").unwrap();
    let f = f.reopen();
    assert_eq!(f.repo.get(id.as_str()).unwrap().modified_ms, 1_000_500);
}

#[test]
fn delete_resource_prunes_empty_directories() {
    let f = fixture();
    let id = f.repo.add(order_flow(), Some(&f.resource_source())).unwrap().id;
    f.repo.delete_resource(id.as_str(), "xsl/order.xsl").unwrap();

    assert_eq!(f.repo.resources(id.as_str()).unwrap(), vec!["descriptor.xml"]);
    assert!(!f.repo.layout().resources_dir(id.as_str()).join("xsl").exists());
}

#[test]
fn missing_resources_are_reported() {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    assert!(matches!(
        f.repo.read_resource(id.as_str(), "nope.xml"),
        Err(RepositoryError::ResourceNotFound(_))
    ));
    assert!(matches!(
        f.repo.delete_resource(id.as_str(), "nope.xml"),
        Err(RepositoryError::ResourceNotFound(_))
    ));
}

#[yare::parameterized(
    parent = { "../application.dmi" },
    absolute = { "/etc/passwd" },
    empty = { "" },
)]
fn resource_paths_cannot_escape(path: &str) {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    assert!(matches!(
        f.repo.put_resource(id.as_str(), path, b"x"),
        Err(RepositoryError::InvalidResourcePath(_))
    ));
    assert!(matches!(
        f.repo.read_resource(id.as_str(), path),
        Err(RepositoryError::InvalidResourcePath(_))
    ));
}

#[test]
fn directory_cannot_be_overwritten_by_a_file() {
    let f = fixture();
    let id = f.repo.add(order_flow(), Some(&f.resource_source())).unwrap().id;
    assert!(matches!(
        f.repo.put_resource(id.as_str(), "xsl", b"x"),
        Err(RepositoryError::InvalidResourcePath(_))
    ));
}

#[test]
fn resources_of_unknown_application() {
    let f = fixture();
    assert!(matches!(f.repo.resources("app-missing"), Err(RepositoryError::NotFound(_))));
}
