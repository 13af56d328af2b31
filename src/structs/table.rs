//! # **Table Module** - *Chunked Columnar Table*
//!
//! A table is an ordered sequence of chunks plus column metadata (names
//! and type tags) and a fixed target chunk size. Rows append into the
//! last chunk; when it reaches the target size a fresh chunk of empty
//! value segments is opened, so only the last chunk may be short.
//!
//! Chunks are compressed one at a time: `compress_chunk` rebuilds every
//! column as a dictionary segment and swaps the chunk atomically. Under
//! the `parallel_proc` feature the per-column builds run on Rayon;
//! collection preserves column order either way, so the replacement chunk
//! is identical in both modes.

use std::fmt::{Display, Formatter};

#[cfg(feature = "parallel_proc")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::traits::print::MAX_PREVIEW;
use crate::{
    Chunk, ChunkId, ColumnId, DataType, DictionaryArray, Segment, StorageError, Value, ValueArray,
};

/// # Table
///
/// Chunked columnar table with string-tagged column metadata.
///
/// ### Fields
/// - `chunks`: ordered horizontal slices; all but the last hold exactly
///   `target_chunk_size` rows while the table grows by appends.
/// - `column_names` / `column_types`: parallel per-column metadata.
///   Names need not be unique; lookups return the first match.
/// - `target_chunk_size`: immutable row capacity per chunk.
#[derive(Clone, Debug)]
pub struct Table {
    chunks: Vec<Chunk>,
    column_names: Vec<String>,
    column_types: Vec<DataType>,
    target_chunk_size: usize,
}

impl Table {
    /// Constructs an empty table holding one empty chunk.
    pub fn new(target_chunk_size: usize) -> Self {
        assert!(target_chunk_size > 0, "target chunk size must be positive");
        Self {
            chunks: vec![Chunk::new()],
            column_names: Vec::new(),
            column_types: Vec::new(),
            target_chunk_size,
        }
    }

    /// Defines a column from a string type tag.
    ///
    /// Fails once any row exists, and on unknown tags. Duplicate names
    /// are allowed; name lookups resolve to the first match.
    pub fn add_column(&mut self, name: &str, type_tag: &str) -> Result<(), StorageError> {
        if self.row_count() != 0 {
            return Err(StorageError::ColumnsFrozen);
        }
        let data_type = DataType::try_from_tag(type_tag)?;
        self.column_names.push(name.to_string());
        self.column_types.push(data_type);
        for chunk in &mut self.chunks {
            chunk.add_segment(Segment::from(ValueArray::new_empty(data_type)))?;
        }
        Ok(())
    }

    /// Appends one row.
    ///
    /// Rolls over to a fresh chunk when the last chunk has reached the
    /// target size. (`>=` rather than `==`: an emplaced chunk may exceed
    /// the target, and appends must still open a new chunk after it.)
    pub fn append(&mut self, values: &[Value]) -> Result<(), StorageError> {
        if values.len() != self.column_count() {
            return Err(StorageError::ColumnCountMismatch {
                expected: self.column_count(),
                found: values.len(),
            });
        }
        if self.last_chunk().size() >= self.target_chunk_size {
            let mut chunk = Chunk::new();
            for data_type in &self.column_types {
                chunk.add_segment(Segment::from(ValueArray::new_empty(*data_type)))?;
            }
            self.chunks.push(chunk);
        }
        self.last_chunk_mut().append(values)
    }

    /// Appends a prebuilt chunk.
    ///
    /// The chunk must carry one segment per column. A table that still
    /// consists of a single empty chunk is replaced instead of grown.
    pub fn emplace_chunk(&mut self, chunk: Chunk) -> Result<(), StorageError> {
        if chunk.column_count() != self.column_count() {
            return Err(StorageError::ColumnCountMismatch {
                expected: self.column_count(),
                found: chunk.column_count(),
            });
        }
        if self.chunks.len() == 1 && self.chunks[0].size() == 0 {
            self.chunks[0] = chunk;
        } else {
            self.chunks.push(chunk);
        }
        Ok(())
    }

    /// Rebuilds the chunk at `chunk_id` with one dictionary segment per
    /// column and swaps it in. Cell values, row count and column count
    /// are unchanged; only the representation differs.
    ///
    /// Panics when `chunk_id` is out of range.
    pub fn compress_chunk(&mut self, chunk_id: ChunkId) -> Result<(), StorageError> {
        let source = &self.chunks[chunk_id.to_usize()];
        let column_types = &self.column_types;

        let build = |column_index: usize| -> Result<Segment, StorageError> {
            let segment = source.segment(ColumnId(column_index as u16));
            Ok(Segment::from(DictionaryArray::from_segment(
                column_types[column_index],
                segment,
            )?))
        };

        #[cfg(feature = "parallel_proc")]
        let segments: Vec<Segment> = (0..self.column_count())
            .into_par_iter()
            .map(build)
            .collect::<Result<_, _>>()?;
        #[cfg(not(feature = "parallel_proc"))]
        let segments: Vec<Segment> = (0..self.column_count())
            .map(build)
            .collect::<Result<_, _>>()?;

        let mut compressed = Chunk::new();
        for segment in segments {
            compressed.add_segment(segment)?;
        }

        debug!(
            chunk = chunk_id.0,
            columns = compressed.column_count(),
            rows = compressed.size(),
            "compressed chunk"
        );
        self.chunks[chunk_id.to_usize()] = compressed;
        Ok(())
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Total rows across all chunks.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.chunks.iter().map(Chunk::size).sum()
    }

    /// Number of chunks (at least one).
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// First column whose name matches.
    pub fn column_id_by_name(&self, name: &str) -> Result<ColumnId, StorageError> {
        self.column_names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| ColumnId(index as u16))
            .ok_or_else(|| StorageError::ColumnNotFound(name.to_string()))
    }

    /// All column names, in column order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Name of one column. Panics when out of range.
    #[inline]
    pub fn column_name(&self, column_id: ColumnId) -> &str {
        &self.column_names[column_id.to_usize()]
    }

    /// Element type of one column. Panics when out of range.
    #[inline]
    pub fn column_type(&self, column_id: ColumnId) -> DataType {
        self.column_types[column_id.to_usize()]
    }

    /// The configured per-chunk row capacity.
    #[inline]
    pub fn target_chunk_size(&self) -> usize {
        self.target_chunk_size
    }

    /// The chunk at `chunk_id`. Panics when out of range.
    #[inline]
    pub fn chunk(&self, chunk_id: ChunkId) -> &Chunk {
        &self.chunks[chunk_id.to_usize()]
    }

    #[inline]
    fn last_chunk(&self) -> &Chunk {
        // Invariant: a table always holds at least one chunk.
        &self.chunks[self.chunks.len() - 1]
    }

    #[inline]
    fn last_chunk_mut(&mut self) -> &mut Chunk {
        let last = self.chunks.len() - 1;
        &mut self.chunks[last]
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Table [{} rows x {} columns, {} chunks]",
            self.row_count(),
            self.column_count(),
            self.chunk_count()
        )?;
        let header: Vec<String> = self
            .column_names
            .iter()
            .zip(&self.column_types)
            .map(|(name, data_type)| format!("{} ({})", name, data_type))
            .collect();
        writeln!(f, "{}", header.join(" | "))?;

        let mut printed = 0;
        for chunk in &self.chunks {
            for offset in 0..chunk.size() {
                if printed == MAX_PREVIEW {
                    return writeln!(f, "... ({} total)", self.row_count());
                }
                let row: Vec<String> = (0..self.column_count())
                    .map(|column| {
                        chunk
                            .segment(ColumnId(column as u16))
                            .value_at(offset)
                            .to_string()
                    })
                    .collect();
                writeln!(f, "{}", row.join(" | "))?;
                printed += 1;
            }
        }
        Ok(())
    }
}
