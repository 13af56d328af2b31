//! # **DataType Module** - *Closed Column Type Universe*
//!
//! The fixed set of element types a column can hold, together with the
//! string tags used when defining columns. Unknown tags are rejected;
//! there is no open extension point.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::StorageError;

/// # DataType
///
/// Logical element type of one column.
///
/// Tags follow the conventional short names: `"int"`, `"long"`,
/// `"float"`, `"double"`, `"string"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Int32,
    Int64,
    Float32,
    Float64,
    String,
}

impl DataType {
    /// Parses a string tag, failing on anything outside the fixed set.
    pub fn try_from_tag(tag: &str) -> Result<Self, StorageError> {
        match tag {
            "int" => Ok(DataType::Int32),
            "long" => Ok(DataType::Int64),
            "float" => Ok(DataType::Float32),
            "double" => Ok(DataType::Float64),
            "string" => Ok(DataType::String),
            other => Err(StorageError::UnknownTypeTag(other.to_string())),
        }
    }

    /// The string tag this type parses from.
    #[inline]
    pub fn tag(&self) -> &'static str {
        match self {
            DataType::Int32 => "int",
            DataType::Int64 => "long",
            DataType::Float32 => "float",
            DataType::Float64 => "double",
            DataType::String => "string",
        }
    }
}

impl FromStr for DataType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_tag(s)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
