//! Read-only store for bundled text resources.
//!
//! Resources are addressed by logical name, not by filesystem path. The
//! usual backing is a directory embedded at compile time with
//! [`include_dir`], so shipped defaults travel inside the binary; an
//! in-memory source exists for hosts that embed their data differently
//! and for tests.

use std::collections::BTreeMap;
use std::path::Path;

use include_dir::Dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("bundled resource '{0}' not found")]
    NotFound(String),
    #[error("bundled resource '{0}' is not valid UTF-8")]
    NotUtf8(String),
}

/// Lookup-by-name access to bundled text assets.
#[derive(Debug)]
pub struct ResourceStore {
    source: Source,
}

#[derive(Debug)]
enum Source {
    Bundled(&'static Dir<'static>),
    Memory(BTreeMap<String, String>),
}

impl ResourceStore {
    /// Wraps a directory embedded with `include_dir::include_dir!`.
    pub fn bundled(dir: &'static Dir<'static>) -> Self {
        Self {
            source: Source::Bundled(dir),
        }
    }

    /// Builds a store from in-memory name/text pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(name, text)| (name.into(), text.into()))
            .collect();
        Self {
            source: Source::Memory(map),
        }
    }

    /// Resolves a logical name to its text content.
    ///
    /// Names may omit the `.json` extension; a bare name that misses is
    /// retried with the extension appended before the lookup fails.
    pub fn load_text(&self, name: &str) -> Result<&str, ResourceError> {
        if let Some(text) = self.lookup(name)? {
            return Ok(text);
        }
        if Path::new(name).extension().is_none() {
            let with_ext = format!("{name}.json");
            if let Some(text) = self.lookup(&with_ext)? {
                return Ok(text);
            }
        }
        Err(ResourceError::NotFound(name.to_string()))
    }

    /// Reports whether a logical name resolves to an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.load_text(name).is_ok()
    }

    fn lookup(&self, name: &str) -> Result<Option<&str>, ResourceError> {
        match &self.source {
            Source::Bundled(dir) => match dir.get_file(name) {
                Some(file) => file
                    .contents_utf8()
                    .map(Some)
                    .ok_or_else(|| ResourceError::NotUtf8(name.to_string())),
                None => Ok(None),
            },
            Source::Memory(map) => Ok(map.get(name).map(String::as_str)),
        }
    }
}
