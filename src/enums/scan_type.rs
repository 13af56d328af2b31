//! # **ScanType Module** - *Value Predicate Discriminant*
//!
//! The six comparison predicates a table scan can apply, with one generic
//! comparator shared by the cell-level and value-id-level scan loops.

use std::fmt::{Display, Formatter};

/// Comparison applied between each cell and a scan's search value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanType {
    Equals,
    NotEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
}

impl ScanType {
    /// Applies the predicate with `left` as the scanned cell and `right`
    /// as the search value.
    ///
    /// Works on any partially ordered type; the dictionary scan reuses it
    /// on signed value ids.
    #[inline]
    pub fn compare<T: PartialOrd>(&self, left: &T, right: &T) -> bool {
        match self {
            ScanType::Equals => left == right,
            ScanType::NotEquals => left != right,
            ScanType::LessThan => left < right,
            ScanType::LessThanEquals => left <= right,
            ScanType::GreaterThan => left > right,
            ScanType::GreaterThanEquals => left >= right,
        }
    }
}

impl Display for ScanType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            ScanType::Equals => "=",
            ScanType::NotEquals => "!=",
            ScanType::LessThan => "<",
            ScanType::LessThanEquals => "<=",
            ScanType::GreaterThan => ">",
            ScanType::GreaterThanEquals => ">=",
        };
        write!(f, "{}", symbol)
    }
}
