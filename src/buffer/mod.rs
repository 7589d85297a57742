//! The owning buffer and its swap strategies.
//!
//! - [`OwningBuffer`] - exclusive owner of a heap-allocated `i32` sequence
//! - [`StorageId`] - opaque identity of a buffer's storage

mod owning;
mod swap;

pub use owning::{MAX_LEN, OwningBuffer, StorageId};
