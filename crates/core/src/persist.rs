//! The persistence facade: round-trips values to and from JSON text.
//!
//! Three addressing modes are supported: explicit filesystem paths, raw
//! in-memory strings, and bundled read-only resources. Every operation is
//! a single-shot, stateless transformation sharing the process-wide
//! serializer configuration; there is no retry, recovery, or logging.

use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gamepersist_resources::ResourceStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use serde_json::ser::PrettyFormatter;

use crate::config::serializer_config;
use crate::error::{PersistError, PersistResult};

/// Writes `value` as indented, type-annotated JSON to `path`.
///
/// Missing parent directories are created. Existing content is truncated,
/// so repeated writes leave only the latest document. The file handle is
/// scoped to this call and released on every exit path.
pub fn serialize<T: Serialize>(value: &T, path: &Path) -> PersistResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let file = File::create(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut writer,
        PrettyFormatter::with_indent(serializer_config().indent),
    );
    value
        .serialize(&mut serializer)
        .map_err(|err| match err.classify() {
            Category::Io => PersistError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(err),
            },
            _ => PersistError::Encode(err.to_string()),
        })?;
    writer.flush().map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Writes `value` as indented, type-annotated JSON into a string.
pub fn serialize_to_string<T: Serialize>(value: &T) -> PersistResult<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut buf,
        PrettyFormatter::with_indent(serializer_config().indent),
    );
    value
        .serialize(&mut serializer)
        .map_err(|err| PersistError::Encode(err.to_string()))?;
    String::from_utf8(buf).map_err(|err| PersistError::Encode(err.to_string()))
}

/// Reconstructs a `T` from JSON text.
///
/// Malformed text fails with [`PersistError::Parse`] carrying the source
/// and offending span; a well-formed document whose shape cannot populate
/// `T` fails with [`PersistError::Mismatch`].
pub fn deserialize<T: DeserializeOwned>(text: &str) -> PersistResult<T> {
    serde_json::from_str(text).map_err(|err| match err.classify() {
        Category::Syntax | Category::Eof => {
            let (offset, length) = json_error_span(text, &err);
            PersistError::Parse {
                message: err.to_string(),
                src: text.to_string(),
                span: (offset, length).into(),
            }
        }
        _ => PersistError::Mismatch(err.to_string()),
    })
}

/// Reads the full text of `path`, then delegates to [`deserialize`].
pub fn deserialize_from_path<T: DeserializeOwned>(path: &Path) -> PersistResult<T> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize(&text)
}

/// Resolves `name` through a bundled resource store, then delegates to
/// [`deserialize`]. A miss fails with [`PersistError::ResourceMissing`].
pub fn deserialize_from_resource<T: DeserializeOwned>(
    store: &ResourceStore,
    name: &str,
) -> PersistResult<T> {
    let text = store.load_text(name)?;
    deserialize(text)
}

/// Locates the byte offset of a serde_json error from its line/column.
fn json_error_span(input: &str, error: &serde_json::Error) -> (usize, usize) {
    let line = error.line();
    let column = error.column();
    if line == 0 || column == 0 {
        return (0, 1);
    }
    let mut current_line = 1usize;
    let mut offset = 0usize;
    for chunk in input.split_inclusive('\n') {
        if current_line == line {
            let column_index = column.saturating_sub(1);
            let byte_index = chunk
                .char_indices()
                .nth(column_index)
                .map(|(idx, _)| idx)
                .unwrap_or(chunk.len().saturating_sub(1));
            offset += byte_index;
            return (offset, 1);
        }
        offset += chunk.len();
        current_line += 1;
    }
    (input.len().saturating_sub(1), 1)
}

#[cfg(test)]
#[path = "tests/persist_tests.rs"]
mod tests;
