use gamepersist_resources::{ResourceError, ResourceStore};
use include_dir::{include_dir, Dir};

static DATA: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/tests/data");

#[test]
fn bundled_store_resolves_embedded_files() {
    let store = ResourceStore::bundled(&DATA);

    let text = store
        .load_text("notes/motd.txt")
        .expect("embedded text file should resolve");
    assert_eq!(text.trim_end(), "welcome, wanderer");
}

#[test]
fn bundled_store_resolves_names_without_extension() {
    let store = ResourceStore::bundled(&DATA);

    let text = store
        .load_text("defaults/player")
        .expect("bare name should resolve to defaults/player.json");
    assert!(text.contains("\"hp\""));
    assert!(store.contains("defaults/player.json"));
}

#[test]
fn bundled_store_miss_is_not_found() {
    let store = ResourceStore::bundled(&DATA);

    let err = store
        .load_text("defaults/does-not-exist")
        .expect_err("unknown resource must miss");
    assert!(matches!(err, ResourceError::NotFound(_)));
}
