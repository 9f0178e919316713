use std::ffi::OsString;
use std::fs;

use taxon_core::config::Config;
use taxon_core::datastore::FileStore;
use taxon_model::{Category, CategoryConfig, CategoryKind, CategoryManager, KeyValueStore};
use tempfile::tempdir;

fn names(manager: &CategoryManager<FileStore>, kind: CategoryKind) -> Vec<String> {
    manager
        .list(kind)
        .iter()
        .map(|category| category.name.clone())
        .collect()
}

#[test]
fn file_store_survives_reload() {
    let temp = tempdir().expect("tempdir");
    let store = FileStore::open(temp.path()).expect("open store");
    let mut manager = CategoryManager::load(store, CategoryConfig::default());

    manager
        .add(CategoryKind::Priority, "Someday")
        .expect("add priority");
    let id = manager
        .resolve(CategoryKind::Status, "in progress")
        .map(|category| category.id.clone())
        .expect("seeded status");
    manager.begin_edit(CategoryKind::Status, &id).expect("begin");
    manager.update_draft("Doing").expect("draft");
    manager.save_edit(CategoryKind::Status, &id).expect("save");

    let reopened = FileStore::open(temp.path()).expect("reopen store");
    let manager = CategoryManager::load(reopened, CategoryConfig::default());
    assert_eq!(
        names(&manager, CategoryKind::Status),
        ["Completed", "Doing", "Not Started"]
    );
    assert_eq!(
        names(&manager, CategoryKind::Priority),
        ["Extreme", "Moderate", "Low", "Someday"]
    );
    assert_eq!(
        manager
            .find(CategoryKind::Status, &id)
            .map(|category| category.name.as_str()),
        Some("Doing")
    );
}

#[test]
fn corrupted_file_resets_both_lists() {
    let temp = tempdir().expect("tempdir");
    let mut store = FileStore::open(temp.path()).expect("open store");
    store
        .set("todoStatusCategories", r#"[{"id":"_x1","name":"Open"}]"#)
        .expect("seed status");
    store
        .set("todoPriorityCategories", r#"{"oops": true}"#)
        .expect("seed priority");

    let manager = CategoryManager::load(store, CategoryConfig::default());
    assert_eq!(
        names(&manager, CategoryKind::Status),
        ["Completed", "In Progress", "Not Started"]
    );
    assert_eq!(names(&manager, CategoryKind::Priority).len(), 3);

    let untouched = fs::read_to_string(temp.path().join("todoPriorityCategories.json"))
        .expect("read priority slot");
    assert_eq!(untouched, r#"{"oops": true}"#);
}

#[test]
fn rc_keys_select_slots_and_seeds() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("taxonrc");
    fs::write(
        &rc,
        "storage.status_key = board.status\ndefaults.status = Open, Closed\n",
    )
    .expect("write rc");

    let cfg = Config::load(Some(rc.as_path())).expect("load config");
    let store = FileStore::open(&temp.path().join("data")).expect("open store");
    let mut manager = CategoryManager::load(store, cfg.category_config().expect("category config"));
    assert_eq!(names(&manager, CategoryKind::Status), ["Open", "Closed"]);

    manager.add(CategoryKind::Status, "Review").expect("add");
    assert!(temp.path().join("data").join("board.status.json").exists());
}

#[test]
fn run_deletes_with_yes_flag() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("taxonrc");
    fs::write(&rc, "color = off\n").expect("write rc");
    let data = temp.path().join("data");

    let args: Vec<OsString> = [
        "taxon",
        "--taxonrc",
        rc.to_str().expect("utf8 path"),
        "--data",
        data.to_str().expect("utf8 path"),
        "--yes",
        "delete",
        "status",
        "Not Started",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    taxon_core::run(args).expect("run delete");

    let raw = fs::read_to_string(data.join("todoStatusCategories.json")).expect("status slot");
    let stored: Vec<Category> = serde_json::from_str(&raw).expect("valid json");
    let stored_names: Vec<&str> = stored.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(stored_names, ["Completed", "In Progress"]);
}

#[test]
fn run_rejects_duplicate_rename() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("taxonrc");
    fs::write(&rc, "color = off\n").expect("write rc");
    let data = temp.path().join("data");

    let args: Vec<OsString> = [
        "taxon",
        "--taxonrc",
        rc.to_str().expect("utf8 path"),
        "--data",
        data.to_str().expect("utf8 path"),
        "rename",
        "status",
        "In Progress",
        "completed",
    ]
    .iter()
    .map(OsString::from)
    .collect();

    let err = taxon_core::run(args).expect_err("duplicate rename");
    assert_eq!(err.to_string(), "A category with this name already exists.");
    assert!(!data.join("todoStatusCategories.json").exists());
}
