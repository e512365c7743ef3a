//! gamepersist: JSON persistence for game data.
//!
//! A thin layer over serde_json tuned for game saves and defaults:
//! - indented, human-readable documents
//! - type-preserving polymorphic fields via an embedded `$type`
//!   discriminator and a process-wide type registry
//! - tolerance for reference cycles in shared object graphs
//! - three addressing modes: filesystem paths, raw strings, and bundled
//!   read-only resources
//!
//! Usage:
//!
//! ```no_run
//! use std::path::Path;
//! # use serde::{Deserialize, Serialize};
//! # #[derive(Serialize, Deserialize)]
//! # struct SaveGame { hp: i64 }
//! let save = SaveGame { hp: 1 };
//! gamepersist::serialize(&save, Path::new("/tmp/save.json"))?;
//! let restored: SaveGame = gamepersist::deserialize_from_path(Path::new("/tmp/save.json"))?;
//! # Ok::<(), gamepersist::PersistError>(())
//! ```

mod config;
mod cycle;
mod error;
mod persist;
mod registry;

pub use config::{serializer_config, SerializerConfig};
pub use cycle::Shared;
pub use error::{PersistError, PersistResult};
pub use persist::{
    deserialize, deserialize_from_path, deserialize_from_resource, serialize, serialize_to_string,
};
pub use registry::{encode_tagged, global_registry, register_type, Dyn, Polymorphic, TypeRegistry};

pub use gamepersist_resources::{ResourceError, ResourceStore};
