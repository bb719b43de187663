//! Error types for the dynarr container.
//!
//! Organized by cause: allocation ([`AllocError`]), container operations
//! ([`ArrayError`], which wraps allocation failures and the element type's
//! own errors), and growth-policy validation ([`ConfigError`]).

use std::alloc::{handle_alloc_error, Layout};
use std::convert::Infallible;
use std::error::Error;
use std::fmt;

/// Failure to obtain storage for a block of element slots.
///
/// Every operation that returns this error leaves the container exactly as
/// it was before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The slot count cannot be represented: the byte size would exceed
    /// `isize::MAX`, or the capacity arithmetic overflowed `usize`.
    CapacityOverflow {
        /// Number of element slots that was requested.
        requested: usize,
    },
    /// The global allocator returned null for a valid layout.
    OutOfMemory {
        /// The layout the allocator was asked for.
        layout: Layout,
    },
}

impl AllocError {
    /// Abort the current operation the way `Vec` does.
    ///
    /// Capacity overflow panics; allocator exhaustion goes through
    /// [`handle_alloc_error`]. Used by the infallible convenience methods.
    pub fn handle(self) -> ! {
        match self {
            Self::CapacityOverflow { requested } => {
                panic!("dynarr: capacity overflow ({requested} slots requested)")
            }
            Self::OutOfMemory { layout } => handle_alloc_error(layout),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots requested")
            }
            Self::OutOfMemory { layout } => {
                write!(
                    f,
                    "out of memory: failed to allocate {} bytes (align {})",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for AllocError {}

/// Errors surfaced by container operations.
///
/// `E` is the element type's own failure type (see
/// [`TryClone::Error`](crate::TryClone::Error)). Operations that never build
/// elements use the default `Infallible`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError<E = Infallible> {
    /// Checked access past the live range.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The number of live elements at the time of the call.
        len: usize,
    },
    /// Storage for the operation could not be obtained.
    Alloc(AllocError),
    /// Building an element (fresh construction or clone) failed.
    Element(E),
}

impl<E> ArrayError<E> {
    /// The element failure carried by this error, if any.
    pub fn element(self) -> Option<E> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` for [`ArrayError::OutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

impl<E> From<AllocError> for ArrayError<E> {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}

impl<E: fmt::Display> fmt::Display for ArrayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index out of range: index {index}, len {len}")
            }
            Self::Alloc(e) => write!(f, "allocation failed: {e}"),
            Self::Element(e) => write!(f, "element construction failed: {e}"),
        }
    }
}

impl<E: Error + 'static> Error for ArrayError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OutOfRange { .. } => None,
            Self::Alloc(e) => Some(e),
            Self::Element(e) => Some(e),
        }
    }
}

/// Invalid growth-policy parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The growth factor must be at least 2 for amortized constant append.
    FactorTooSmall {
        /// The rejected factor.
        factor: usize,
    },
    /// The first allocation must hold at least one slot.
    ZeroMinimumCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FactorTooSmall { factor } => {
                write!(f, "growth factor must be >= 2, got {factor}")
            }
            Self::ZeroMinimumCapacity => write!(f, "minimum capacity must be >= 1"),
        }
    }
}

impl Error for ConfigError {}
