//! # **Print Module** - *Convenience Pretty Printing*
//!
//! Contains the `Print` trait, which wraps `Display` to provide
//! `myobj.print()` for any object that implements it.

use std::fmt::Display;

/// Row cap for table previews rendered through `Display`.
pub(crate) const MAX_PREVIEW: usize = 25;

/// # Print
///
/// Loaded print trait for pretty printing tables.
///
/// Provides a more convenient way to activate `Display` via
/// `mytable.print()`, avoiding the need to write
/// `println!("{}", mytable);`.
pub trait Print {
    #[inline]
    fn print(&self)
    where
        Self: Display,
    {
        println!("{}", self);
    }
}

impl<T: Display> Print for T {}
