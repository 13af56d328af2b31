//! # **Shale** – Chunked Columnar In-Memory Storage
//!
//! A small relational storage core: tables are stored column-wise in
//! fixed-capacity chunks, chunks compress into immutable
//! dictionary-encoded segments with bit-width minimal attribute vectors,
//! and filtering runs through a composable `TableScan` operator that
//! materialises its matches as lightweight reference tables.
//!
//! ## Key pieces
//! - **Segments** – three representations of one column slice behind one
//!   variant: mutable typed storage, dictionary compression, and
//!   position-list indirection.
//! - **Dictionary encoding** – sorted duplicate-free dictionaries with
//!   `u8`/`u16`/`u32` attribute lanes picked per chunk, plus
//!   `lower_bound`/`upper_bound` queries for predicate translation.
//! - **Operators** – one-shot, output-caching execution nodes
//!   (`GetTable`, `TableScan`) chained through shared handles.
//! - **TableScan** – per-representation scan paths; dictionary chunks
//!   are filtered on value ids without decompression, reference inputs
//!   collapse onto their base table.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use shale::{
//!     ChunkId, ColumnId, GetTable, Operator, ScanType, StorageManager, Table, TableScan, Value,
//! };
//!
//! let mut table = Table::new(100);
//! table.add_column("n", "int").unwrap();
//! for i in 0..10 {
//!     table.append(&[Value::from(i)]).unwrap();
//! }
//! table.compress_chunk(ChunkId(0)).unwrap();
//! StorageManager::get().add_table("numbers", Arc::new(table)).unwrap();
//!
//! let source = Arc::new(GetTable::new("numbers"));
//! let scan = TableScan::new(source, ColumnId(0), ScanType::GreaterThan, Value::from(6));
//! assert_eq!(scan.execute().unwrap().row_count(), 3);
//! # StorageManager::get().drop_table("numbers").unwrap();
//! ```
//!
//! ## Concurrency model
//! Operator graphs execute single-threaded; tables and segments are
//! shared through `Arc` and immutable once built, so results can be read
//! from any thread. With the default `parallel_proc` feature,
//! `Table::compress_chunk` builds its per-column dictionary segments on
//! Rayon.

/// **Segment**, **Value**, **DataType**... - *the tagged variants the engine dispatches on.*
pub mod enums {
    pub mod collections {
        pub mod dictionary_array;
        pub mod value_array;
    }
    pub mod data_type;
    pub mod error;
    pub mod scan_type;
    pub mod segment;
    pub mod value;
}

/// **Table**, **Chunk** and the typed segment bodies.
pub mod structs {
    pub mod variants {
        pub mod attribute_vector;
        pub mod dictionary_segment;
        pub mod reference_segment;
        pub mod value_segment;
    }
    pub mod chunk;
    pub mod table;
}

/// **GetTable**, **TableScan** - *composable, output-caching execution nodes.*
pub mod operators {
    pub mod base;
    pub mod get_table;
    pub mod table_scan;
}

/// **Type standardisation** - `ColumnType`, `Integer`, `Print`.
pub mod traits {
    pub mod print;
    pub mod type_unions;
}

pub mod macros;
pub mod storage_manager;
pub mod types;

pub use enums::collections::dictionary_array::DictionaryArray;
pub use enums::collections::value_array::ValueArray;
pub use enums::data_type::DataType;
pub use enums::error::StorageError;
pub use enums::scan_type::ScanType;
pub use enums::segment::Segment;
pub use enums::value::Value;
pub use operators::base::{Operator, OutputCache};
pub use operators::get_table::GetTable;
pub use operators::table_scan::TableScan;
pub use storage_manager::StorageManager;
pub use structs::chunk::Chunk;
pub use structs::table::Table;
pub use structs::variants::attribute_vector::{AttributeVector, FixedSizeAttributeVector};
pub use structs::variants::dictionary_segment::DictionarySegment;
pub use structs::variants::reference_segment::ReferenceSegment;
pub use structs::variants::value_segment::ValueSegment;
pub use traits::print::Print;
pub use traits::type_unions::{ColumnType, Integer};
pub use types::{
    ChunkId, ChunkOffset, ColumnId, INVALID_VALUE_ID, PositionList, RowId, ValueId,
};
