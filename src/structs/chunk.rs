//! # **Chunk Module** - *Horizontal Table Slice*
//!
//! A chunk is an ordered tuple of segments, one per column, all of equal
//! length. Tables grow by filling their last chunk and opening a new one;
//! compression swaps a chunk of value segments for a chunk of dictionary
//! segments in place.

use crate::{ColumnId, Segment, StorageError, Value};

/// # Chunk
///
/// Same-length segments, one per column. Row `i` of the chunk is cell `i`
/// of every segment.
#[derive(Clone, Debug, Default)]
pub struct Chunk {
    segments: Vec<Segment>,
}

impl Chunk {
    /// Constructs an empty chunk.
    #[inline]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Adds a column segment.
    ///
    /// The first segment fixes the chunk's length; every later segment
    /// must match it.
    pub fn add_segment(&mut self, segment: Segment) -> Result<(), StorageError> {
        if !self.segments.is_empty() && segment.len() != self.size() {
            return Err(StorageError::LengthMismatch {
                expected: self.size(),
                found: segment.len(),
            });
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Appends one row, forwarding value `i` to segment `i`.
    ///
    /// Arity and every value's tag are validated before any segment is
    /// touched, so a failed append leaves all segments at equal length.
    pub fn append(&mut self, values: &[Value]) -> Result<(), StorageError> {
        if values.len() != self.column_count() {
            return Err(StorageError::ColumnCountMismatch {
                expected: self.column_count(),
                found: values.len(),
            });
        }
        for (segment, value) in self.segments.iter().zip(values) {
            match segment {
                Segment::Value(_) => {
                    if segment.data_type() != value.data_type() {
                        return Err(StorageError::TypeMismatch {
                            expected: segment.data_type(),
                            found: value.data_type(),
                        });
                    }
                }
                Segment::Dictionary(_) => {
                    return Err(StorageError::AppendToImmutable {
                        segment_kind: "dictionary",
                    });
                }
                Segment::Reference(_) => {
                    return Err(StorageError::AppendToImmutable {
                        segment_kind: "reference",
                    });
                }
            }
        }
        for (segment, value) in self.segments.iter_mut().zip(values) {
            segment.append(value)?;
        }
        Ok(())
    }

    /// The segment holding column `column_id`.
    ///
    /// Panics when the column is out of range.
    #[inline]
    pub fn segment(&self, column_id: ColumnId) -> &Segment {
        &self.segments[column_id.to_usize()]
    }

    /// All segments, in column order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of rows (the shared segment length).
    #[inline]
    pub fn size(&self) -> usize {
        self.segments.first().map_or(0, Segment::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataType, ValueArray, ValueSegment};

    fn int_string_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        chunk
            .add_segment(Segment::from(ValueArray::new_empty(DataType::Int32)))
            .unwrap();
        chunk
            .add_segment(Segment::from(ValueArray::new_empty(DataType::String)))
            .unwrap();
        chunk
    }

    #[test]
    fn append_fills_all_segments() {
        let mut chunk = int_string_chunk();
        chunk
            .append(&[Value::from(4), Value::from("Hello,")])
            .unwrap();
        chunk
            .append(&[Value::from(6), Value::from("world")])
            .unwrap();
        assert_eq!(chunk.size(), 2);
        assert_eq!(chunk.column_count(), 2);
        assert_eq!(chunk.segment(ColumnId(1)).value_at(1), Value::from("world"));
    }

    #[test]
    fn append_with_wrong_arity_fails() {
        let mut chunk = int_string_chunk();
        assert_eq!(
            chunk.append(&[Value::from(4)]).unwrap_err(),
            StorageError::ColumnCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn append_with_wrong_tag_leaves_lengths_equal() {
        let mut chunk = int_string_chunk();
        chunk.append(&[Value::from(1), Value::from("a")]).unwrap();
        assert!(chunk.append(&[Value::from(2), Value::from(2)]).is_err());
        assert_eq!(chunk.segment(ColumnId(0)).len(), 1);
        assert_eq!(chunk.segment(ColumnId(1)).len(), 1);
    }

    #[test]
    fn add_segment_enforces_equal_length() {
        let mut chunk = Chunk::new();
        chunk
            .add_segment(Segment::from(ValueArray::from(ValueSegment::from(vec![
                1i32, 2, 3,
            ]))))
            .unwrap();
        let err = chunk
            .add_segment(Segment::from(ValueArray::from(ValueSegment::from(vec![
                1i64,
            ]))))
            .unwrap_err();
        assert_eq!(
            err,
            StorageError::LengthMismatch {
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    #[should_panic]
    fn segment_out_of_range_panics() {
        let chunk = int_string_chunk();
        chunk.segment(ColumnId(2));
    }

    #[test]
    fn empty_chunk_has_size_zero() {
        assert_eq!(Chunk::new().size(), 0);
        assert_eq!(Chunk::new().column_count(), 0);
    }
}
