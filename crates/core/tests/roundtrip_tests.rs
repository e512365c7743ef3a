use std::any::Any;

use gamepersist::{
    deserialize, deserialize_from_path, deserialize_from_resource, register_type, serialize,
    serialize_to_string, Dyn, PersistError, Polymorphic, ResourceStore,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct TestObject {
    name: String,
    hp: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Goblin {
    hp: i64,
}

impl Polymorphic for Goblin {
    fn type_tag(&self) -> &'static str {
        "Goblin"
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn file_roundtrip_preserves_name_and_hp() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("saves").join("test.json");

    let a = TestObject {
        name: "abcd".to_string(),
        hp: 1,
    };
    serialize(&a, &path).expect("write should succeed");

    let b: TestObject = deserialize_from_path(&path).expect("read should succeed");
    assert_eq!(b.name, "abcd");
    assert_eq!(b.hp, 1);
}

#[test]
fn file_on_disk_is_a_pretty_printed_document() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("test.json");

    let a = TestObject {
        name: "abcd".to_string(),
        hp: 1,
    };
    serialize(&a, &path).expect("write should succeed");

    let text = std::fs::read_to_string(&path).expect("file should be readable");
    assert!(text.starts_with('{'));
    assert!(text.contains("\n  \"name\": \"abcd\""));
    let reparsed: Value = serde_json::from_str(&text).expect("file should be complete JSON");
    assert_eq!(reparsed["hp"], serde_json::json!(1));
}

#[test]
fn resource_roundtrip_and_miss() {
    let a = TestObject {
        name: "abcd".to_string(),
        hp: 1,
    };
    let store = ResourceStore::from_entries([(
        "defaults/test",
        serialize_to_string(&a).expect("encode should succeed"),
    )]);

    let b: TestObject =
        deserialize_from_resource(&store, "defaults/test").expect("resource read should succeed");
    assert_eq!(b, a);

    let err = deserialize_from_resource::<TestObject>(&store, "does-not-exist")
        .expect_err("unknown resource must fail");
    assert!(matches!(err, PersistError::ResourceMissing(name) if name == "does-not-exist"));
}

#[test]
fn polymorphic_field_survives_a_file_roundtrip() {
    register_type::<Goblin>("Goblin");

    #[derive(Debug, Serialize, Deserialize)]
    struct Encounter {
        enemy: Dyn,
    }

    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("encounter.json");

    let encounter = Encounter {
        enemy: Dyn::new(Goblin { hp: 5 }),
    };
    serialize(&encounter, &path).expect("write should succeed");

    let text = std::fs::read_to_string(&path).expect("file should be readable");
    assert!(text.contains("\"$type\": \"Goblin\""));

    let restored: Encounter = deserialize_from_path(&path).expect("read should succeed");
    let goblin = restored
        .enemy
        .downcast_ref::<Goblin>()
        .expect("enemy should come back as a Goblin");
    assert_eq!(goblin.hp, 5);
}

#[test]
fn string_roundtrip_law() {
    let a = TestObject {
        name: "abcd".to_string(),
        hp: 1,
    };
    let restored: TestObject =
        deserialize(&serialize_to_string(&a).expect("encode should succeed"))
            .expect("decode should succeed");
    assert_eq!(restored, a);
}
