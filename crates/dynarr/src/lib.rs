//! Growable contiguous arrays over manually managed storage.
//!
//! [`DynArray<T>`] keeps its elements in one heap block obtained from the
//! global allocator, tracks the number of live elements at the front of that
//! block, and grows geometrically when an append finds it full.
//!
//! # Architecture
//!
//! ```text
//! DynArray<T>
//! ├── RawBuf<T>      (block + capacity; never drops elements)
//! ├── len            (live prefix 0..len)
//! └── GrowthPolicy   (factor + minimum first allocation)
//!
//! PartialBlock<T>    (fresh block under construction, unwinds on failure)
//! TailFill<'_, T>    (appends into spare capacity, commits length on exit)
//! ```
//!
//! # Failure model
//!
//! Element construction can fail in two ways: a fallible constructor or
//! [`TryClone`] impl returns `Err`, or a constructor panics. Both are handled
//! the same way. Anything that reallocates builds into the new block first
//! and only then moves the live elements over and frees the old one, so a
//! failed reservation or growth-triggered append leaves the array exactly as
//! it was. Relocation is a bitwise move and cannot fail.
//!
//! Infallible conveniences (`push`, `reserve`, `resize`, ...) follow the
//! standard library: capacity overflow panics and allocator exhaustion goes
//! through [`std::alloc::handle_alloc_error`]. The `try_` forms report both
//! as [`AllocError`].
//!
//! # Unsafe code
//!
//! `unsafe` is confined to `raw.rs`, `guard.rs`, `iter.rs` and `array.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod array;
pub mod config;
pub mod cursor;
mod guard;
pub mod iter;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynArray;
pub use config::GrowthPolicy;
pub use cursor::Cursor;
pub use iter::{IntoIter, Iter, IterMut};

pub use dynarr_core::{AllocError, ArrayError, ConfigError, TryClone};

/// Build a [`DynArray`] from a literal list or a repeated value.
///
/// ```
/// use dynarr::{dynarr, DynArray};
///
/// let empty: DynArray<u8> = dynarr![];
/// let listed = dynarr![1, 2, 3];
/// let repeated = dynarr![0u8; 4];
///
/// assert!(empty.is_empty());
/// assert_eq!(listed, [1, 2, 3]);
/// assert_eq!(repeated, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! dynarr {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}
