// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::archive;
use dmi_core::{ApplicationArchive, ArchiveEntry};

#[test]
fn export_then_import_into_another_repository() {
    let source = fixture();
    let app = source.repo.add(order_flow(), Some(&source.resource_source())).unwrap();
    source.repo.apply(app.id.as_str(), &LifecycleAction::Deploy).unwrap();
    let bytes = source.repo.export_archive(app.id.as_str()).unwrap();

    let target = fixture();
    target.clock.set_epoch_ms(5_000_000);
    let imported = target.repo.import_archive(&bytes, false).unwrap();

    assert_eq!(imported.id, app.id);
    assert_eq!(imported.services, app.services);
    assert_eq!(imported.state, ApplicationState::Installed);
    assert_eq!(imported.created_ms, 5_000_000);
    assert_eq!(
        target.repo.resources(app.id.as_str()).unwrap(),
        vec!["descriptor.xml", "xsl/order.xsl"]
    );
    assert_eq!(
        target.repo.read_resource(app.id.as_str(), "xsl/order.xsl").unwrap(),
        b"<xsl:stylesheet/>"
    );
}

#[test]
fn exported_archive_holds_the_stored_definition() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    f.repo.put_resource(app.id.as_str(), "a.txt", b"alpha").unwrap();

    let unpacked = archive::unpack(&f.repo.export_archive(app.id.as_str()).unwrap()).unwrap();
    assert_eq!(unpacked.application, f.repo.get(app.id.as_str()).unwrap());
    assert_eq!(unpacked.entries.len(), 1);
    assert_eq!(unpacked.entries[0].path, "a.txt");
    assert_eq!(unpacked.entries[0].data, b"alpha");
}

#[test]
fn import_requires_replace_for_existing_id() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    let bytes = f.repo.export_archive(app.id.as_str()).unwrap();
    f.repo.put_resource(app.id.as_str(), "added-later.txt", b"x").unwrap();

    assert!(matches!(
        f.repo.import_archive(&bytes, false),
        Err(RepositoryError::AlreadyExists(_))
    ));

    f.clock.advance(Duration::from_secs(1));
    let replaced = f.repo.import_archive(&bytes, true).unwrap();
    assert_eq!(replaced.created_ms, app.created_ms);
    assert_eq!(replaced.modified_ms, 1_001_000);
    assert!(f.repo.resources(app.id.as_str()).unwrap().is_empty());
    assert_eq!(f.repo.list().len(), 1);
}

#[test]
fn import_refuses_to_replace_active_application() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    let bytes = f.repo.export_archive(app.id.as_str()).unwrap();
    for action in [LifecycleAction::Deploy, LifecycleAction::Launch, LifecycleAction::MarkRunning] {
        f.repo.apply(app.id.as_str(), &action).unwrap();
    }

    assert!(matches!(
        f.repo.import_archive(&bytes, true),
        Err(RepositoryError::Busy { state: ApplicationState::Running, .. })
    ));
}

#[test]
fn import_rejects_name_clash_with_other_application() {
    let source = fixture();
    let app = source.repo.add(order_flow(), None).unwrap();
    let bytes = source.repo.export_archive(app.id.as_str()).unwrap();

    let target = fixture();
    target.repo.add(order_flow(), None).unwrap();
    assert!(matches!(
        target.repo.import_archive(&bytes, true),
        Err(RepositoryError::DuplicateName(_))
    ));
}

#[test]
fn import_rejects_escaping_entry_paths() {
    let f = fixture();
    let archive = ApplicationArchive {
        application: order_flow(),
        entries: vec![ArchiveEntry { path: "../../evil".to_string(), data: b"x".to_vec() }],
    };
    let bytes = archive::pack(&archive, ProtocolVersion::CURRENT).unwrap();

    assert!(matches!(
        f.repo.import_archive(&bytes, false),
        Err(RepositoryError::InvalidResourcePath(_))
    ));
    assert!(f.repo.list().is_empty());
}

#[yare::parameterized(
    escaping = { "../../escaped" },
    empty = { "" },
    nested = { "a/b" },
    staging = { "orders.tmp" },
)]
fn import_rejects_ids_that_are_not_one_directory(id: &str) {
    let f = fixture();
    let mut application = order_flow();
    application.id = ApplicationId::from_string(id);
    let archive = ApplicationArchive {
        application,
        entries: vec![ArchiveEntry { path: "a.txt".to_string(), data: b"x".to_vec() }],
    };
    let bytes = archive::pack(&archive, ProtocolVersion::CURRENT).unwrap();

    assert!(matches!(
        f.repo.import_archive(&bytes, false),
        Err(RepositoryError::InvalidId(bad)) if bad == id
    ));
    assert!(f.repo.list().is_empty());
    assert!(!f.dir.path().join("escaped").exists());
}

#[test]
fn import_rejects_garbage() {
    let f = fixture();
    assert!(matches!(f.repo.import_archive(b"garbage", false), Err(RepositoryError::BadArchive(_))));
}
