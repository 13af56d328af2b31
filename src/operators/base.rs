//! # **Operator Base Module** - *Composable Execution Nodes*
//!
//! Operators form a dependency graph: each node holds shared handles to
//! up to two input operators, and executing a node produces one table,
//! computed once and cached. Downstream nodes consume the cached output
//! of their inputs; execution is synchronous and runs to completion or
//! fails.

use std::sync::{Arc, OnceLock};

use crate::{StorageError, Table};

/// # Operator
///
/// One node of an operator graph.
///
/// `execute` is idempotent: the first call computes the output table,
/// every later call returns the cached handle. Executing a node pulls
/// its inputs through their own `execute`, so a graph is evaluated in
/// dependency order with each result computed exactly once.
pub trait Operator: Send + Sync {
    /// Runs the node (once) and returns its output table.
    fn execute(&self) -> Result<Arc<Table>, StorageError>;

    /// The cached output, if the node has executed.
    fn get_output(&self) -> Option<Arc<Table>>;

    /// The first input operator, for nodes that have one.
    fn left_input(&self) -> Option<&Arc<dyn Operator>> {
        None
    }

    /// The second input operator, for nodes that have one.
    fn right_input(&self) -> Option<&Arc<dyn Operator>> {
        None
    }
}

/// # OutputCache
///
/// One-shot output slot shared by all operator implementations.
///
/// Failures are not cached: a node that failed to execute may be retried
/// by the host, and only a successful table is pinned.
#[derive(Debug, Default)]
pub struct OutputCache {
    table: OnceLock<Arc<Table>>,
}

impl OutputCache {
    #[inline]
    pub fn new() -> Self {
        Self {
            table: OnceLock::new(),
        }
    }

    /// The cached table, if one has been produced.
    #[inline]
    pub fn get(&self) -> Option<Arc<Table>> {
        self.table.get().cloned()
    }

    /// Returns the cached table, producing it on first call.
    pub fn get_or_execute(
        &self,
        produce: impl FnOnce() -> Result<Arc<Table>, StorageError>,
    ) -> Result<Arc<Table>, StorageError> {
        if let Some(table) = self.table.get() {
            return Ok(table.clone());
        }
        let table = produce()?;
        Ok(self.table.get_or_init(|| table).clone())
    }
}
