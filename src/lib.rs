//! movebuf
//!
//! Copy versus move semantics, made observable.
//!
//! `movebuf` provides [`OwningBuffer`], a value that exclusively owns a
//! heap-allocated sequence of `i32`. It is a small teaching primitive for:
//!
//! - deep copies (new storage, source unchanged)
//! - ownership transfer (same storage, source left empty)
//! - copy-swap versus move-swap cost
//!
//! Every allocation, copy, move and release is counted per thread (see
//! [`stats`]) and traced through the `log` facade on the
//! `movebuf::lifecycle` target.
//!
//! The crate intentionally:
//! - does NOT provide a generic container
//! - does NOT share buffers across threads
//! - does NOT serialize buffers
//!
//! # Example
//!
//! ```
//! use movebuf::{OwningBuffer, stats};
//!
//! fn main() -> Result<(), movebuf::BufferError> {
//!     let mut a = OwningBuffer::sized(2)?;
//!     let mut b = OwningBuffer::sized(5)?;
//!
//!     // Three deep copies.
//!     a.copy_swap(&mut b)?;
//!     assert_eq!(a.as_slice(), &[0, 1, 2, 3, 4]);
//!
//!     // Pure ownership transfer.
//!     let before = stats::snapshot();
//!     a.move_swap(&mut b);
//!     assert_eq!(a.as_slice(), &[0, 1]);
//!     assert_eq!(stats::snapshot().since(&before).allocations, 0);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod bulk;
mod config;
mod error;

#[cfg(feature = "digest")]
mod digest;

pub mod stats;

//
// Public surface
//

pub use buffer::{MAX_LEN, OwningBuffer, StorageId};
pub use bulk::{BulkReport, run_bulk, run_bulk_with_moves};
pub use config::{
    BulkConfig, DEFAULT_BULK_COUNT, DEFAULT_BULK_LEN, DemoConfig, ENV_BULK_COUNT, ENV_BULK_LEN,
    ENV_TRACE,
};
pub use error::BufferError;
pub use stats::LifecycleStats;

#[cfg(feature = "digest")]
pub use digest::ContentDigest;
