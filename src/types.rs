//! # **Types Module** - *Strongly-Typed Storage Handles*
//!
//! Identifier newtypes shared across the storage layer, plus the row
//! addressing pair (`RowId`) and the position list produced by scans.
//!
//! Keeping these as distinct types (rather than bare integers) makes it
//! impossible to hand a chunk index where a column index is expected,
//! at zero runtime cost.

use std::fmt::{Display, Formatter};

/// Index of a chunk within a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkId(pub u32);

impl ChunkId {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

/// Index of a column within a table or chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(pub u16);

impl ColumnId {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

/// Row offset within a single chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkOffset(pub u32);

impl ChunkOffset {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

/// Index into a dictionary segment's sorted dictionary.
///
/// Attribute vectors store these in 1, 2 or 4 byte lanes. The sentinel
/// [`INVALID_VALUE_ID`] is the maximum representable value, so a
/// width-truncated copy still lands on the lane's own maximum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(pub u32);

impl ValueId {
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

/// Returned by dictionary bound queries when no dictionary entry qualifies.
pub const INVALID_VALUE_ID: ValueId = ValueId(u32::MAX);

/// Address of one row: which chunk, and which offset inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    #[inline]
    pub fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> Self {
        Self {
            chunk_id,
            chunk_offset,
        }
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.chunk_id.0, self.chunk_offset.0)
    }
}

/// Ordered row addresses produced by a scan.
///
/// One scan produces one position list, wrapped in an `Arc` and shared by
/// every reference segment of the scan's output table. All entries refer
/// to the same underlying non-reference table.
pub type PositionList = Vec<RowId>;
