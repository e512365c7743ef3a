//! Round-trip smoke test for the persistence layer.
//!
//! Writes a small object to a scratch file, prints the document, reads it
//! back, and checks the fields. Run with:
//!
//!   cargo run --example roundtrip_smoke

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct TestObject {
    name: String,
    hp: i64,
}

fn main() -> miette::Result<()> {
    let path = std::env::temp_dir()
        .join("gamepersist_smoke")
        .join("test.json");

    let a = TestObject {
        name: "abcd".to_string(),
        hp: 1,
    };
    gamepersist::serialize(&a, &path)?;
    println!("{}", std::fs::read_to_string(&path).into_diagnostic()?);

    let b: TestObject = gamepersist::deserialize_from_path(&path)?;
    assert_eq!(b.name, "abcd");
    assert_eq!(b.hp, 1);
    println!("round trip ok: {b:?}");

    let _ = std::fs::remove_dir_all(path.parent().expect("scratch path has a parent"));
    Ok(())
}
