/// Default nesting limit shared by the serializer and the deserializer.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs shared by both directions of the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Maximum composite nesting accepted on input and emitted on output.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecOptions {
    /// Options with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
