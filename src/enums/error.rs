//! # **Error Module** - Custom *Shale* Error Type
//!
//! Defines the unified error type for the storage engine.
//!
//! ## Covers
//! - Variant/element type disagreements (appends, search values, casts).
//! - Schema violations: late column additions, column-count mismatches,
//!   segment length mismatches.
//! - Immutability violations on compressed and reference segments.
//! - Registry misses and conflicts, unknown type tags, unknown columns.
//! - Implements `Display` for readable output and `Error` for integration
//!   with standard Rust error handling.

use std::error::Error;
use std::fmt;

use crate::DataType;

/// Catch all error type for `Shale`.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// A variant payload did not match the expected element type.
    TypeMismatch {
        expected: DataType,
        found: DataType,
    },
    /// A segment's length disagreed with its chunk.
    LengthMismatch {
        expected: usize,
        found: usize,
    },
    /// A row or chunk carried the wrong number of columns.
    ColumnCountMismatch {
        expected: usize,
        found: usize,
    },
    /// Column definitions are frozen once the first row exists.
    ColumnsFrozen,
    /// Append attempted on a dictionary or reference segment.
    AppendToImmutable {
        segment_kind: &'static str,
    },
    /// No column with the given name.
    ColumnNotFound(String),
    /// Type tag outside the fixed column type set.
    UnknownTypeTag(String),
    /// No table registered under the given name.
    TableNotFound(String),
    /// A table with the given name is already registered.
    TableAlreadyExists(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::TypeMismatch { expected, found } => {
                write!(
                    f,
                    "Type mismatch: expected '{}', found '{}'.",
                    expected, found
                )
            }
            StorageError::LengthMismatch { expected, found } => {
                write!(
                    f,
                    "Length mismatch: segment holds {} rows, chunk holds {}.",
                    found, expected
                )
            }
            StorageError::ColumnCountMismatch { expected, found } => {
                write!(
                    f,
                    "Column count mismatch: expected {}, found {}.",
                    expected, found
                )
            }
            StorageError::ColumnsFrozen => {
                write!(f, "Cannot add a column to a table that already holds rows.")
            }
            StorageError::AppendToImmutable { segment_kind } => {
                write!(f, "Cannot append to immutable {} segment.", segment_kind)
            }
            StorageError::ColumnNotFound(name) => {
                write!(f, "Column '{}' not found.", name)
            }
            StorageError::UnknownTypeTag(tag) => {
                write!(f, "Unknown column type tag '{}'.", tag)
            }
            StorageError::TableNotFound(name) => {
                write!(f, "No table named '{}'.", name)
            }
            StorageError::TableAlreadyExists(name) => {
                write!(f, "A table named '{}' already exists.", name)
            }
        }
    }
}

impl Error for StorageError {}
