//! BLAKE3 content digests of buffer contents.
//!
//! A digest identifies *what* a buffer holds, independently of *where* it is
//! stored. Comparing digests next to [`StorageId`](crate::StorageId)s shows
//! whether a swap moved contents, storage, or both.

use std::fmt;

use crate::buffer::OwningBuffer;

/// BLAKE3 hash of a buffer's elements, taken as little-endian bytes.
///
/// Comparison goes through `blake3::Hash`, which compares in constant time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentDigest(blake3::Hash);

impl ContentDigest {
    /// Hashes a sequence of elements.
    pub fn of(elements: &[i32]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for value in elements {
            hasher.update(&value.to_le_bytes());
        }
        Self(hasher.finalize())
    }

    /// Returns the digest as a 64-character hex string.
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl OwningBuffer {
    /// Returns the BLAKE3 digest of the elements.
    ///
    /// Equal contents give equal digests, whatever their storage.
    ///
    /// # Example
    ///
    /// ```
    /// use movebuf::OwningBuffer;
    ///
    /// let a = OwningBuffer::sized(4)?;
    /// let b = a.try_clone()?;
    /// assert_ne!(a.storage_id(), b.storage_id());
    /// assert_eq!(a.digest(), b.digest());
    /// # Ok::<(), movebuf::BufferError>(())
    /// ```
    pub fn digest(&self) -> ContentDigest {
        ContentDigest::of(self.as_slice())
    }
}
