//! Codec options: immutable configuration fixed at construction.
//!
//! Options are plain data and can be loaded from a host application's own
//! JSON configuration. Every field has a default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

/// What `decode` does with object keys the target type does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Drop them silently (forward compatible).
    #[default]
    Ignore,
    /// Fail with `DecodingError::UnknownField`.
    Deny,
}

/// What `encode` does with `NaN` and infinities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFiniteFloats {
    #[default]
    Reject,
    /// Write `null`, the way serde_json does on its own.
    Null,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    #[default]
    Compact,
    Pretty,
}

/// Configuration of a `DefaultJson`.
///
/// # Example
/// ```ignore
/// let codec = DefaultJson::with_options(
///     CodecOptions::strict().with_style(OutputStyle::Pretty),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub unknown_fields: UnknownFields,
    pub non_finite: NonFiniteFloats,
    pub style: OutputStyle,
}

impl CodecOptions {
    /// Defaults, except that unknown keys are rejected on decode.
    pub fn strict() -> Self {
        Self::default().with_unknown_fields(UnknownFields::Deny)
    }

    pub fn with_unknown_fields(mut self, unknown_fields: UnknownFields) -> Self {
        self.unknown_fields = unknown_fields;
        self
    }

    pub fn with_non_finite(mut self, non_finite: NonFiniteFloats) -> Self {
        self.non_finite = non_finite;
        self
    }

    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }
}
