// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn paths_nest_under_root() {
    let layout = Layout::new("/srv/dmi");
    assert_eq!(layout.lock_path(), Path::new("/srv/dmi/.lock"));
    assert_eq!(
        layout.definition_path("app-1"),
        Path::new("/srv/dmi/applications/app-1/application.dmi")
    );
    assert_eq!(layout.resources_dir("app-1"), Path::new("/srv/dmi/applications/app-1/resources"));
}

#[test]
fn staging_names_share_the_swept_suffix() {
    let layout = Layout::new("/srv/dmi");
    for dir in [layout.staging_dir("app-1"), layout.retired_dir("app-1")] {
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with(STAGING_SUFFIX), "{name}");
        assert_eq!(dir.parent(), Some(layout.applications_dir().as_path()));
    }
}

#[test]
fn lock_is_exclusive_until_dropped() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());

    let held = layout.create_and_lock().unwrap();
    assert!(layout.applications_dir().is_dir());
    assert!(matches!(layout.create_and_lock(), Err(RepositoryError::Locked(_))));

    drop(held);
    layout.create_and_lock().unwrap();
}

#[yare::parameterized(
    generated = { "app-V1StGXR8_Z5jdHi6B-myT" },
    plain = { "orders" },
    dotted = { "orders.v2" },
    inner_suffix = { "orders.tmp.v1" },
)]
fn plain_ids_name_one_directory(id: &str) {
    check_id(id).unwrap();
    let dir = Layout::new("/srv/dmi").app_dir(id);
    assert_eq!(dir.parent(), Some(Path::new("/srv/dmi/applications")));
}
