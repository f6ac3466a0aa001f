use serde::{Deserialize, Serialize};

/// Database storage types. Only the types the logical field set compiles to
/// are represented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes (2, 4, or 8)
    Integer(u8),

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u32),

    /// Decimal number with optional precision and scale.
    /// - `None`: Arbitrary-precision decimal
    /// - `Some((precision, scale))`: Fixed precision and scale
    Numeric(Option<(u32, u32)>),

    /// A civil date
    Date,

    /// A civil wall clock time
    Time,

    /// A timestamp without time zone
    Timestamp,

    /// An instant in time
    TimestampTz,

    /// 128-bit universally unique identifier (UUID)
    Uuid,

    /// A binary JSON document
    Jsonb,

    /// An array of text values
    TextArray,
}

impl Type {
    pub fn is_array(&self) -> bool {
        matches!(self, Self::TextArray)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text | Self::VarChar(_))
    }
}
