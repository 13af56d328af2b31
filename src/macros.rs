//! # **Macros Module** - *Tag-to-Type Dispatch*
//!
//! Exported macros that recover a compile-time element type from a
//! runtime [`DataType`](crate::DataType) tag.

/// Expands `$body` once per concrete element type, with `$T` aliased to
/// the type selected by `$data_type` at runtime.
///
/// This is the bridge between the string-tagged column surface and the
/// monomorphised inner loops: each match arm is compiled for exactly one
/// element type, so the body runs without per-cell dynamic dispatch.
///
/// # Example
/// ```rust
/// use shale::{Value, resolve_data_type};
///
/// let cell = Value::from(42i32);
/// let printed = resolve_data_type!(cell.data_type(), T, {
///     let typed: T = cell.cast().unwrap();
///     format!("{:?}", typed)
/// });
/// assert_eq!(printed, "42");
/// ```
#[macro_export]
macro_rules! resolve_data_type {
    ($data_type:expr, $T:ident, $body:block) => {
        match $data_type {
            $crate::DataType::Int32 => {
                type $T = i32;
                $body
            }
            $crate::DataType::Int64 => {
                type $T = i64;
                $body
            }
            $crate::DataType::Float32 => {
                type $T = f32;
                $body
            }
            $crate::DataType::Float64 => {
                type $T = f64;
                $body
            }
            $crate::DataType::String => {
                type $T = ::std::string::String;
                $body
            }
        }
    };
}
