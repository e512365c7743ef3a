//! Process-wide serializer configuration.

use std::sync::OnceLock;

/// Settings shared by every persistence operation.
///
/// Built once on first use and never mutated or torn down afterwards, so
/// every operation in the process observes identical policies. First-time
/// construction is guarded by [`OnceLock`], which keeps concurrent first
/// use from racing.
#[derive(Clone, Debug)]
pub struct SerializerConfig {
    /// Indentation unit for human-readable output.
    pub indent: &'static [u8],
    /// Reserved object key carrying the concrete-type discriminator.
    pub type_tag: &'static str,
    /// Drop cyclic back-references instead of failing the write.
    pub skip_cycles: bool,
}

impl SerializerConfig {
    fn new() -> Self {
        Self {
            indent: b"  ",
            type_tag: "$type",
            skip_cycles: true,
        }
    }
}

static CONFIG: OnceLock<SerializerConfig> = OnceLock::new();

/// Returns the shared configuration, building it on first call.
pub fn serializer_config() -> &'static SerializerConfig {
    CONFIG.get_or_init(SerializerConfig::new)
}
