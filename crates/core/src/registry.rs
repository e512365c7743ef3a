//! Type-preserving polymorphic serialization.
//!
//! Fields typed as a trait object cannot name their concrete type in the
//! document, so the emitted JSON object carries a discriminator key (the
//! shared configuration's `$type`) and reads consult a process-wide
//! registry mapping discriminator strings back to concrete decoders.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::config::serializer_config;
use crate::error::{PersistError, PersistResult};

/// A value that can live behind a trait object and still round-trip to its
/// concrete type.
pub trait Polymorphic: Any + fmt::Debug {
    /// The discriminator written into the document.
    fn type_tag(&self) -> &'static str;
    /// The value's plain JSON representation, without the discriminator.
    fn to_json(&self) -> Result<Value, serde_json::Error>;
    /// Upcast for downcasting back to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

type DecodeFn = fn(Value) -> PersistResult<Box<dyn Polymorphic>>;

/// Maps discriminator strings to concrete reconstruction logic.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `tag`. Re-registering a tag replaces its decoder.
    pub fn register<T>(&mut self, tag: &'static str)
    where
        T: Polymorphic + DeserializeOwned,
    {
        self.decoders.insert(tag, |value| {
            serde_json::from_value::<T>(value)
                .map(|decoded| Box::new(decoded) as Box<dyn Polymorphic>)
                .map_err(|err| PersistError::Mismatch(err.to_string()))
        });
    }

    /// Reconstructs a concrete value from a tagged JSON object.
    pub fn decode(&self, value: Value) -> PersistResult<Box<dyn Polymorphic>> {
        let tag_key = serializer_config().type_tag;
        let Value::Object(mut map) = value else {
            return Err(PersistError::Mismatch(
                "polymorphic document is not a JSON object".to_string(),
            ));
        };
        let tag = match map.remove(tag_key) {
            Some(Value::String(tag)) => tag,
            Some(_) => {
                return Err(PersistError::Mismatch(format!(
                    "'{tag_key}' type tag is not a string"
                )))
            }
            None => {
                return Err(PersistError::Mismatch(format!(
                    "missing '{tag_key}' type tag"
                )))
            }
        };
        let decode = self
            .decoders
            .get(tag.as_str())
            .ok_or_else(|| PersistError::UnknownType(tag.clone()))?;
        decode(Value::Object(map))
    }
}

/// Embeds the discriminator into a value's JSON representation.
pub fn encode_tagged(value: &dyn Polymorphic) -> PersistResult<Value> {
    let mut json = value
        .to_json()
        .map_err(|err| PersistError::Encode(err.to_string()))?;
    match json.as_object_mut() {
        Some(map) => {
            let tag_key = serializer_config().type_tag;
            map.insert(
                tag_key.to_string(),
                Value::String(value.type_tag().to_string()),
            );
        }
        None => {
            return Err(PersistError::Encode(format!(
                "polymorphic value '{}' must serialize to a JSON object",
                value.type_tag()
            )))
        }
    }
    Ok(json)
}

static REGISTRY: OnceLock<RwLock<TypeRegistry>> = OnceLock::new();

/// The process-wide registry consulted by [`Dyn`] fields.
pub fn global_registry() -> &'static RwLock<TypeRegistry> {
    REGISTRY.get_or_init(|| RwLock::new(TypeRegistry::new()))
}

/// Registers `T` under `tag` in the process-wide registry.
pub fn register_type<T>(tag: &'static str)
where
    T: Polymorphic + DeserializeOwned,
{
    global_registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register::<T>(tag);
}

/// A polymorphic field: serializes with an embedded discriminator and
/// deserializes back to the original concrete type via the process-wide
/// registry.
#[derive(Debug)]
pub struct Dyn(pub Box<dyn Polymorphic>);

impl Dyn {
    pub fn new<T: Polymorphic>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn downcast_ref<T: Polymorphic>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref()
    }
}

impl Serialize for Dyn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = encode_tagged(self.0.as_ref()).map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dyn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        global_registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .decode(value)
            .map(Dyn)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
