// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod resources;
mod transfer;

use super::*;
use dmi_core::test_support::order_flow;
use dmi_core::{Endpoint, FakeClock, Route, ValidationError};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

pub(super) struct Fixture {
    pub dir: TempDir,
    pub clock: FakeClock,
    pub repo: ApplicationRepository<FakeClock>,
}

pub(super) fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let repo = ApplicationRepository::open(dir.path().join("repo"), clock.clone()).unwrap();
    Fixture { dir, clock, repo }
}

impl Fixture {
    pub fn reopen(self) -> Fixture {
        let Fixture { dir, clock, repo } = self;
        drop(repo);
        let repo = ApplicationRepository::open(dir.path().join("repo"), clock.clone()).unwrap();
        Fixture { dir, clock, repo }
    }

    pub fn resource_source(&self) -> PathBuf {
        let src = self.dir.path().join("src");
        fs::create_dir_all(src.join("xsl")).unwrap();
        fs::write(src.join("descriptor.xml"), "<application/>").unwrap();
        fs::write(src.join("xsl/order.xsl"), "<xsl:stylesheet/>").unwrap();
        src
    }
}

// ── Open ─────────────────────────────────────────────────────────────────────

#[test]
fn open_creates_layout() {
    let f = fixture();
    assert!(f.repo.layout().applications_dir().is_dir());
    assert!(f.repo.layout().lock_path().is_file());
    assert!(f.repo.list().is_empty());
}

#[test]
fn second_open_is_locked_out() {
    let f = fixture();
    let err = ApplicationRepository::open(f.repo.root().to_path_buf(), SystemClock).err().unwrap();
    assert!(matches!(err, RepositoryError::Locked(_)));
}

#[test]
fn open_sweeps_staging_directories() {
    let f = fixture();
    let apps = f.repo.layout().applications_dir();
    fs::create_dir_all(apps.join("app-half.tmp/resources")).unwrap();
    fs::create_dir_all(apps.join("app-gone.old.tmp")).unwrap();

    let f = f.reopen();
    let apps = f.repo.layout().applications_dir();
    assert!(!apps.join("app-half.tmp").exists());
    assert!(!apps.join("app-gone.old.tmp").exists());
}

#[test]
fn open_skips_corrupt_definitions() {
    let f = fixture();
    let good = f.repo.add(order_flow(), None).unwrap();
    let bad_dir = f.repo.layout().app_dir("app-broken");
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(bad_dir.join("application.dmi"), b"not dmi").unwrap();

    let f = f.reopen();
    let ids: Vec<_> = f.repo.list().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![good.id]);
}

#[test]
fn open_skips_definition_in_wrong_directory() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    let apps = f.repo.layout().applications_dir();
    fs::rename(apps.join(app.id.as_str()), apps.join("app-renamed")).unwrap();

    let f = f.reopen();
    assert!(f.repo.list().is_empty());
}

#[test]
fn applications_survive_reopen() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    f.repo.apply(app.id.as_str(), &LifecycleAction::Deploy).unwrap();

    let f = f.reopen();
    let loaded = f.repo.get(app.id.as_str()).unwrap();
    assert_eq!(loaded.state, ApplicationState::Deployed);
    assert_eq!(loaded.services, app.services);
    assert_eq!(loaded.routes, app.routes);
}

// ── Add / lookup ─────────────────────────────────────────────────────────────

#[test]
fn add_stamps_and_installs() {
    let f = fixture();
    let mut app = order_flow();
    app.state = ApplicationState::Running;
    app.last_error = Some("stale".to_string());

    let stored = f.repo.add(app.clone(), None).unwrap();
    assert_eq!(stored.state, ApplicationState::Installed);
    assert_eq!(stored.last_error, None);
    assert_eq!(stored.created_ms, 1_000_000);
    assert_eq!(stored.modified_ms, 1_000_000);
    assert!(f.repo.layout().definition_path(app.id.as_str()).is_file());
    assert!(f.repo.layout().resources_dir(app.id.as_str()).is_dir());
}

#[test]
fn add_copies_resource_tree() {
    let f = fixture();
    let src = f.resource_source();
    let app = f.repo.add(order_flow(), Some(&src)).unwrap();
    assert_eq!(
        f.repo.resources(app.id.as_str()).unwrap(),
        vec!["descriptor.xml", "xsl/order.xsl"]
    );
}

#[test]
fn add_with_missing_resources_leaves_nothing_behind() {
    let f = fixture();
    let missing = f.dir.path().join("nope");
    let err = f.repo.add(order_flow(), Some(&missing)).unwrap_err();
    assert!(matches!(err, RepositoryError::Io(_)));
    assert!(f.repo.list().is_empty());
    assert_eq!(fs::read_dir(f.repo.layout().applications_dir()).unwrap().count(), 0);
}

#[test]
fn add_rejects_invalid_definition() {
    let f = fixture();
    let app = order_flow().with_route(Route::new(
        "dangling",
        Endpoint::new("feeder", "OUT_PORT"),
        Endpoint::new("ghost", "IN_PORT"),
    ));
    let err = f.repo.add(app, None).unwrap_err();
    assert!(matches!(err, RepositoryError::Invalid(ValidationError::UnknownService { .. })));
}

#[test]
fn add_rejects_duplicate_id_and_name() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();

    let mut same_id = order_flow();
    same_id.id = app.id.clone();
    same_id.name = "Other".to_string();
    assert!(matches!(f.repo.add(same_id, None), Err(RepositoryError::AlreadyExists(_))));

    assert!(matches!(
        f.repo.add(order_flow(), None),
        Err(RepositoryError::DuplicateName(name)) if name == "OrderFlow"
    ));
}

#[yare::parameterized(
    escaping = { "../../escaped" },
    parent = { ".." },
    empty = { "" },
    nested = { "orders/v2" },
    backslash = { "orders\\v2" },
    hidden = { ".orders" },
    staging = { "orders.tmp" },
    retired = { "orders.old.tmp" },
)]
fn add_rejects_ids_that_are_not_one_directory(id: &str) {
    let f = fixture();
    let mut app = order_flow();
    app.id = ApplicationId::from_string(id);

    assert!(matches!(f.repo.add(app, None), Err(RepositoryError::InvalidId(bad)) if bad == id));
    assert!(f.repo.list().is_empty());
    assert!(!f.dir.path().join("escaped").exists());
    let entries = fs::read_dir(f.repo.layout().applications_dir()).unwrap().count();
    assert_eq!(entries, 0);
}

#[test]
fn add_with_staging_like_id_does_not_vanish_on_reopen() {
    let f = fixture();
    let mut app = order_flow();
    app.id = ApplicationId::from_string("orders.tmp");
    assert!(f.repo.add(app, None).is_err());

    let mut app = order_flow();
    app.id = ApplicationId::from_string("orders.tmp.v1");
    f.repo.add(app, None).unwrap();

    let f = f.reopen();
    assert!(f.repo.get("orders.tmp.v1").is_some());
}

#[test]
fn update_rejects_unsafe_id() {
    let f = fixture();
    let mut app = order_flow();
    app.id = ApplicationId::from_string("../escaped");
    assert!(matches!(f.repo.update(app), Err(RepositoryError::InvalidId(_))));
}

#[test]
fn list_is_sorted_by_name() {
    let f = fixture();
    for name in ["Zeta", "Alpha", "Mid"] {
        let mut app = order_flow();
        app.name = name.to_string();
        f.repo.add(app, None).unwrap();
    }
    let names: Vec<_> = f.repo.list().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
}

#[test]
fn get_accepts_unique_prefixes() {
    let f = fixture();
    let mut a = order_flow();
    a.id = ApplicationId::from_string("app-abc111");
    let mut b = order_flow();
    b.id = ApplicationId::from_string("app-abd222");
    b.name = "Second".to_string();
    f.repo.add(a, None).unwrap();
    f.repo.add(b, None).unwrap();

    assert_eq!(f.repo.get("app-abc111").unwrap().name, "OrderFlow");
    assert_eq!(f.repo.get("abc").unwrap().name, "OrderFlow");
    assert_eq!(f.repo.get("app-abd").unwrap().name, "Second");
    assert!(f.repo.get("ab").is_none(), "ambiguous prefix");
    assert!(f.repo.get("zzz").is_none());
}

#[test]
fn find_by_name_is_exact() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    assert_eq!(f.repo.find_by_name("OrderFlow").unwrap().id, app.id);
    assert!(f.repo.find_by_name("orderflow").is_none());
}

// ── Update / lifecycle ───────────────────────────────────────────────────────

#[test]
fn update_keeps_state_and_creation_time() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    f.repo.apply(app.id.as_str(), &LifecycleAction::Deploy).unwrap();
    f.clock.advance(Duration::from_secs(5));

    let mut edited = app.clone().with_description("edited");
    edited.state = ApplicationState::Failed;
    let stored = f.repo.update(edited).unwrap();

    assert_eq!(stored.description, "edited");
    assert_eq!(stored.state, ApplicationState::Deployed);
    assert_eq!(stored.created_ms, 1_000_000);
    assert_eq!(stored.modified_ms, 1_005_000);
    assert_eq!(f.reopen().repo.list()[0].description, "edited");
}

#[test]
fn update_requires_existing_and_unique_name() {
    let f = fixture();
    assert!(matches!(f.repo.update(order_flow()), Err(RepositoryError::NotFound(_))));

    let first = f.repo.add(order_flow(), None).unwrap();
    let second = f.repo.duplicate(first.id.as_str(), "Copy").unwrap();
    let mut renamed = second.clone();
    renamed.name = "OrderFlow".to_string();
    assert!(matches!(f.repo.update(renamed), Err(RepositoryError::DuplicateName(_))));
}

#[test]
fn apply_walks_the_lifecycle() {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    let id = id.as_str();

    for (action, state) in [
        (LifecycleAction::Deploy, ApplicationState::Deployed),
        (LifecycleAction::Launch, ApplicationState::Launching),
        (LifecycleAction::MarkRunning, ApplicationState::Running),
        (LifecycleAction::Fail { reason: "broker down".to_string() }, ApplicationState::Failed),
    ] {
        assert_eq!(f.repo.apply(id, &action).unwrap(), state);
    }
    assert_eq!(f.repo.get(id).unwrap().last_error.as_deref(), Some("broker down"));

    assert_eq!(f.repo.apply(id, &LifecycleAction::Launch).unwrap(), ApplicationState::Launching);
    assert_eq!(f.repo.get(id).unwrap().last_error, None);
}

#[test]
fn invalid_transition_is_not_persisted() {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    let err = f.repo.apply(id.as_str(), &LifecycleAction::MarkRunning).unwrap_err();
    assert!(matches!(err, RepositoryError::Lifecycle(_)));
    assert_eq!(f.reopen().repo.get(id.as_str()).unwrap().state, ApplicationState::Installed);
}

// ── Remove / duplicate ───────────────────────────────────────────────────────

#[test]
fn remove_refuses_active_without_force() {
    let f = fixture();
    let id = f.repo.add(order_flow(), None).unwrap().id;
    f.repo.apply(id.as_str(), &LifecycleAction::Deploy).unwrap();
    f.repo.apply(id.as_str(), &LifecycleAction::Launch).unwrap();

    let err = f.repo.remove(id.as_str(), false).unwrap_err();
    assert!(matches!(err, RepositoryError::Busy { state: ApplicationState::Launching, .. }));

    let removed = f.repo.remove(id.as_str(), true).unwrap();
    assert_eq!(removed.id, id);
    assert!(!f.repo.layout().app_dir(id.as_str()).exists());
    assert!(f.repo.get(id.as_str()).is_none());
}

#[test]
fn remove_unknown_is_not_found() {
    let f = fixture();
    assert!(matches!(f.repo.remove("app-missing", true), Err(RepositoryError::NotFound(_))));
}

#[test]
fn duplicate_copies_definition_and_resources() {
    let f = fixture();
    let src = f.resource_source();
    let original = f.repo.add(order_flow(), Some(&src)).unwrap();
    f.repo.apply(original.id.as_str(), &LifecycleAction::Deploy).unwrap();

    let copy = f.repo.duplicate(original.id.as_str(), "OrderFlow Copy").unwrap();
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.state, ApplicationState::Installed);
    assert_eq!(copy.services.len(), original.services.len());
    assert_ne!(copy.services[0].id, original.services[0].id);
    assert_eq!(
        f.repo.resources(copy.id.as_str()).unwrap(),
        f.repo.resources(original.id.as_str()).unwrap()
    );
    assert_eq!(f.repo.list().len(), 2);
}

#[test]
fn duplicate_rejects_taken_name() {
    let f = fixture();
    let app = f.repo.add(order_flow(), None).unwrap();
    assert!(matches!(
        f.repo.duplicate(app.id.as_str(), "OrderFlow"),
        Err(RepositoryError::DuplicateName(_))
    ));
}
