//! Core types and traits for the dynarr container.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! error taxonomy shared by every container operation and the
//! [`TryClone`] capability that lets element copies fail.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

pub use error::{AllocError, ArrayError, ConfigError};
pub use traits::TryClone;
