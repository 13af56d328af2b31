//! # **Segment Module** - *Three-Way Column Segment Variant*
//!
//! The single type a chunk stores its columns as. A segment is either
//! mutable typed storage ([`ValueArray`]), an immutable compressed
//! representation ([`DictionaryArray`]), or an indirection into another
//! table ([`ReferenceSegment`]).
//!
//! All three share the read capability (`value_at`, `len`, `data_type`);
//! appends succeed only on the value variant. Operators pattern-match on
//! this enum instead of downcasting.

use crate::{DataType, DictionaryArray, ReferenceSegment, StorageError, Value, ValueArray};

/// # Segment
///
/// One column of one chunk, in whichever representation it currently has.
#[derive(Clone, Debug)]
pub enum Segment {
    Value(ValueArray),
    Dictionary(DictionaryArray),
    Reference(ReferenceSegment),
}

impl Segment {
    /// Number of rows in this segment.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Segment::Value(array) => array.len(),
            Segment::Dictionary(array) => array.len(),
            Segment::Reference(segment) => segment.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type of the stored (or referenced) column.
    #[inline]
    pub fn data_type(&self) -> DataType {
        match self {
            Segment::Value(array) => array.data_type(),
            Segment::Dictionary(array) => array.data_type(),
            Segment::Reference(segment) => segment.data_type(),
        }
    }

    /// The cell at `offset`, wrapped in a variant. Panics out of range.
    ///
    /// Operators that care about throughput should match on the variant
    /// and use the typed accessors instead of calling this per row.
    #[inline]
    pub fn value_at(&self, offset: usize) -> Value {
        match self {
            Segment::Value(array) => array.value_at(offset),
            Segment::Dictionary(array) => array.value_at(offset),
            Segment::Reference(segment) => segment.value_at(offset),
        }
    }

    /// Appends a variant to a value segment; dictionary and reference
    /// segments are immutable and reject the append.
    pub fn append(&mut self, value: &Value) -> Result<(), StorageError> {
        match self {
            Segment::Value(array) => array.append(value),
            Segment::Dictionary(_) => Err(StorageError::AppendToImmutable {
                segment_kind: "dictionary",
            }),
            Segment::Reference(_) => Err(StorageError::AppendToImmutable {
                segment_kind: "reference",
            }),
        }
    }

    /// Best-effort heap footprint of this segment.
    #[inline]
    pub fn estimate_memory_usage(&self) -> usize {
        match self {
            Segment::Value(array) => array.estimate_memory_usage(),
            Segment::Dictionary(array) => array.estimate_memory_usage(),
            Segment::Reference(segment) => segment.estimate_memory_usage(),
        }
    }
}

impl From<ValueArray> for Segment {
    #[inline]
    fn from(array: ValueArray) -> Self {
        Segment::Value(array)
    }
}

impl From<DictionaryArray> for Segment {
    #[inline]
    fn from(array: DictionaryArray) -> Self {
        Segment::Dictionary(array)
    }
}

impl From<ReferenceSegment> for Segment {
    #[inline]
    fn from(segment: ReferenceSegment) -> Self {
        Segment::Reference(segment)
    }
}
