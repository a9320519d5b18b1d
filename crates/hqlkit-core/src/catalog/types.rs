//! Scalar attribute types.

use serde::{Deserialize, Serialize};

/// Type of a scalar attribute as mapped by the ORM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarType {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    /// `BigDecimal`-style column with fixed precision and scale.
    Decimal { precision: u8, scale: u8 },
    String,
    Bytes,
    /// Date/time column.
    Timestamp,
    Uuid,
}

impl ScalarType {
    /// Name used as the terminal target of a path element.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 => "float64",
            ScalarType::Decimal { .. } => "decimal",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
            ScalarType::Timestamp => "timestamp",
            ScalarType::Uuid => "uuid",
        }
    }
}
