//! The owning integer buffer.

use std::fmt;

use crate::error::BufferError;
use crate::stats::{self, Lifecycle};

/// Largest length [`OwningBuffer::sized`] accepts.
///
/// Element `i` is initialized to `i as i32`, so the last element `len - 1`
/// must fit in an `i32`.
pub const MAX_LEN: usize = i32::MAX as usize + 1;

/// Opaque identity of a buffer's storage.
///
/// Two live buffers never share a `StorageId`. A move keeps the id, a copy
/// produces a new one. It gives no access to the elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageId(usize);

impl StorageId {
    /// Returns the storage address as an integer.
    pub fn addr(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A buffer that exclusively owns a heap-allocated sequence of `i32`.
///
/// The buffer either owns storage of `len() > 0` elements, or owns nothing
/// and has `len() == 0`. Copies duplicate the storage; moves transfer it and
/// leave the source empty. Every allocation is released exactly once, when
/// the owning buffer is dropped or its contents are replaced.
///
/// # Example
///
/// ```
/// use movebuf::OwningBuffer;
///
/// let mut a = OwningBuffer::sized(3)?;
/// assert_eq!(a.as_slice(), &[0, 1, 2]);
///
/// let copy = a.try_clone()?;
/// assert_eq!(copy, a);
/// assert_ne!(copy.storage_id(), a.storage_id());
///
/// let id = a.storage_id();
/// let moved = a.take();
/// assert_eq!(moved.storage_id(), id);
/// assert!(a.is_empty());
/// # Ok::<(), movebuf::BufferError>(())
/// ```
#[derive(Debug, Default)]
pub struct OwningBuffer {
    // `None` is the owns-nothing state; `Some` always holds at least one element.
    data: Option<Box<[i32]>>,
}

impl OwningBuffer {
    /// Creates an empty buffer that owns no storage.
    pub const fn new() -> Self {
        Self { data: None }
    }

    /// Creates a buffer of `len` elements initialized to `0, 1, ..., len - 1`.
    ///
    /// A zero length yields the empty state without allocating.
    ///
    /// # Errors
    ///
    /// - [`BufferError::LengthTooLarge`] if `len > MAX_LEN`
    /// - [`BufferError::AllocationFailed`] if storage cannot be obtained
    ///
    /// # Example
    ///
    /// ```
    /// use movebuf::OwningBuffer;
    ///
    /// let buf = OwningBuffer::sized(5)?;
    /// assert_eq!(buf.as_slice(), &[0, 1, 2, 3, 4]);
    ///
    /// let empty = OwningBuffer::sized(0)?;
    /// assert!(empty.storage_id().is_none());
    /// # Ok::<(), movebuf::BufferError>(())
    /// ```
    pub fn sized(len: usize) -> Result<Self, BufferError> {
        if len > MAX_LEN {
            return Err(BufferError::LengthTooLarge {
                requested: len,
                max: MAX_LEN,
            });
        }

        let data = if len == 0 {
            None
        } else {
            let mut storage = allocate(len)?;
            storage.extend((0..len).map(|i| i as i32));
            Some(storage.into_boxed_slice())
        };

        stats::record(Lifecycle::Construct { len });
        Ok(Self { data })
    }

    /// Deep-copies this buffer into newly allocated storage.
    ///
    /// `self` is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if storage cannot be obtained.
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        let data = self.duplicate()?;
        stats::record(Lifecycle::CopyConstruct { len: self.len() });
        Ok(Self { data })
    }

    /// Moves the storage out into a new buffer, leaving `self` empty.
    ///
    /// Never allocates and never copies elements.
    pub fn take(&mut self) -> Self {
        let data = self.data.take();
        stats::record(Lifecycle::MoveConstruct {
            len: data.as_deref().map_or(0, <[i32]>::len),
        });
        Self { data }
    }

    /// Replaces the contents of `self` with a deep copy of `other`.
    ///
    /// The new storage is allocated before the old one is released, so on
    /// failure `self` is left unchanged.
    ///
    /// Assigning a buffer to itself cannot be expressed; the borrow checker
    /// rejects it:
    ///
    /// ```compile_fail
    /// let mut x = movebuf::OwningBuffer::sized(3)?;
    /// x.copy_assign(&x)?;
    /// # Ok::<(), movebuf::BufferError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if storage cannot be obtained.
    pub fn copy_assign(&mut self, other: &OwningBuffer) -> Result<(), BufferError> {
        let data = other.duplicate()?;
        stats::record(Lifecycle::CopyAssign { len: other.len() });
        self.release();
        self.data = data;
        Ok(())
    }

    /// Releases the storage of `self`, then adopts the storage of `other`,
    /// leaving `other` empty.
    ///
    /// Never allocates and never copies elements. As with
    /// [`copy_assign`](Self::copy_assign), self-assignment does not compile:
    ///
    /// ```compile_fail
    /// let mut x = movebuf::OwningBuffer::sized(3)?;
    /// x.move_assign(&mut x);
    /// # Ok::<(), movebuf::BufferError>(())
    /// ```
    pub fn move_assign(&mut self, other: &mut OwningBuffer) {
        stats::record(Lifecycle::MoveAssign { len: other.len() });
        self.release();
        self.data = other.data.take();
    }

    /// Releases the owned storage now, leaving an empty buffer.
    ///
    /// Calling this on an empty buffer does nothing.
    pub fn clear(&mut self) {
        self.release();
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.as_deref().map_or(0, <[i32]>::len)
    }

    /// Returns true if the buffer owns no storage.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Returns the elements.
    pub fn as_slice(&self) -> &[i32] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Returns the identity of the owned storage, or `None` when empty.
    pub fn storage_id(&self) -> Option<StorageId> {
        self.data
            .as_deref()
            .map(|storage| StorageId(storage.as_ptr() as usize))
    }

    fn duplicate(&self) -> Result<Option<Box<[i32]>>, BufferError> {
        match self.data.as_deref() {
            None => Ok(None),
            Some(source) => {
                let mut storage = allocate(source.len())?;
                storage.extend_from_slice(source);
                Ok(Some(storage.into_boxed_slice()))
            }
        }
    }

    fn release(&mut self) {
        if let Some(storage) = self.data.take() {
            stats::record(Lifecycle::Release { len: storage.len() });
        }
    }
}

/// Reserves exactly `len` elements so the later boxing does not reallocate.
fn allocate(len: usize) -> Result<Vec<i32>, BufferError> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(len)
        .map_err(|source| BufferError::allocation(len, source))?;
    Ok(storage)
}

impl Clone for OwningBuffer {
    /// Deep copy. Like `Vec::clone`, aborts if storage cannot be obtained;
    /// use [`OwningBuffer::try_clone`] to handle that case.
    fn clone(&self) -> Self {
        let data = self.data.clone();
        stats::record(Lifecycle::CopyConstruct { len: self.len() });
        Self { data }
    }
}

impl Drop for OwningBuffer {
    fn drop(&mut self) {
        if self.data.is_some() {
            self.release();
        } else {
            stats::record(Lifecycle::DropEmpty);
        }
    }
}

impl PartialEq for OwningBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for OwningBuffer {}

impl AsRef<[i32]> for OwningBuffer {
    fn as_ref(&self) -> &[i32] {
        self.as_slice()
    }
}

impl fmt::Display for OwningBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.storage_id() {
            Some(id) => write!(f, "OwningBuffer({} elements @ {})", self.len(), id),
            None => write!(f, "OwningBuffer(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;

    #[test]
    fn test_default_is_empty() {
        let buf = OwningBuffer::default();
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.storage_id().is_none());
        assert!(buf.as_slice().is_empty());
    }

    #[test]
    fn test_sized_initializes_indices() {
        for n in [1usize, 2, 5, 64, 1000] {
            let buf = OwningBuffer::sized(n).unwrap();
            assert_eq!(buf.len(), n);
            assert!(buf.storage_id().is_some());
            for (i, &v) in buf.as_slice().iter().enumerate() {
                assert_eq!(v, i as i32);
            }
        }
    }

    #[test]
    fn test_sized_zero_normalizes_to_empty() {
        let before = stats::snapshot();
        let buf = OwningBuffer::sized(0).unwrap();
        assert!(buf.is_empty());
        assert!(buf.storage_id().is_none());
        assert_eq!(stats::snapshot().since(&before).allocations, 0);
    }

    #[test]
    fn test_sized_rejects_oversized_length() {
        let before = stats::snapshot();
        let err = OwningBuffer::sized(MAX_LEN + 1).unwrap_err();
        assert_eq!(
            err,
            BufferError::LengthTooLarge {
                requested: MAX_LEN + 1,
                max: MAX_LEN,
            }
        );
        assert_eq!(
            stats::snapshot().since(&before),
            stats::LifecycleStats::default()
        );
    }

    #[test]
    fn test_try_clone_is_deep() {
        let original = OwningBuffer::sized(4).unwrap();
        let copy = original.try_clone().unwrap();

        assert_eq!(copy.as_slice(), original.as_slice());
        assert_ne!(copy.storage_id(), original.storage_id());
        assert_eq!(original.len(), 4);
    }

    #[test]
    fn test_clone_matches_try_clone() {
        let original = OwningBuffer::sized(3).unwrap();
        let before = stats::snapshot();
        let copy = original.clone();
        let delta = stats::snapshot().since(&before);

        assert_eq!(copy, original);
        assert_ne!(copy.storage_id(), original.storage_id());
        assert_eq!(delta.allocations, 1);
        assert_eq!(delta.copies, 1);
        assert_eq!(delta.elements_copied, 3);
    }

    #[test]
    fn test_clone_of_empty_does_not_allocate() {
        let empty = OwningBuffer::new();
        let before = stats::snapshot();
        let copy = empty.try_clone().unwrap();
        assert!(copy.is_empty());
        assert_eq!(stats::snapshot().since(&before).allocations, 0);
    }

    #[test]
    fn test_take_transfers_storage() {
        let mut source = OwningBuffer::sized(6).unwrap();
        let id = source.storage_id();

        let before = stats::snapshot();
        let dest = source.take();
        let delta = stats::snapshot().since(&before);

        assert_eq!(dest.storage_id(), id);
        assert_eq!(dest.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert!(source.is_empty());
        assert_eq!(source.len(), 0);
        assert!(source.storage_id().is_none());
        assert_eq!(delta.allocations, 0);
        assert_eq!(delta.releases, 0);
        assert_eq!(delta.moves, 1);
    }

    #[test]
    fn test_copy_assign_replaces_contents() {
        let mut dest = OwningBuffer::sized(2).unwrap();
        let source = OwningBuffer::sized(5).unwrap();
        let old_id = dest.storage_id();

        let before = stats::snapshot();
        dest.copy_assign(&source).unwrap();
        let delta = stats::snapshot().since(&before);

        assert_eq!(dest, source);
        assert_ne!(dest.storage_id(), source.storage_id());
        assert_ne!(dest.storage_id(), old_id);
        assert_eq!(delta.allocations, 1);
        assert_eq!(delta.releases, 1);
    }

    #[test]
    fn test_copy_assign_from_empty_releases() {
        let mut dest = OwningBuffer::sized(2).unwrap();
        dest.copy_assign(&OwningBuffer::new()).unwrap();
        assert!(dest.is_empty());
        assert!(dest.storage_id().is_none());
    }

    #[test]
    fn test_copy_assign_from_equal_copy_keeps_contents() {
        let mut x = OwningBuffer::sized(4).unwrap();
        let same = x.try_clone().unwrap();
        x.copy_assign(&same).unwrap();
        assert_eq!(x.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_move_assign_adopts_and_empties_source() {
        let mut dest = OwningBuffer::sized(2).unwrap();
        let mut source = OwningBuffer::sized(5).unwrap();
        let source_id = source.storage_id();

        let before = stats::snapshot();
        dest.move_assign(&mut source);
        let delta = stats::snapshot().since(&before);

        assert_eq!(dest.storage_id(), source_id);
        assert_eq!(dest.as_slice(), &[0, 1, 2, 3, 4]);
        assert!(source.is_empty());
        assert_eq!(delta.allocations, 0);
        assert_eq!(delta.releases, 1);
        assert_eq!(delta.moves, 1);
    }

    #[test]
    fn test_move_assign_from_empty() {
        let mut dest = OwningBuffer::sized(3).unwrap();
        let mut source = OwningBuffer::new();
        dest.move_assign(&mut source);
        assert!(dest.is_empty());
        assert!(source.is_empty());
    }

    #[test]
    fn test_drop_after_move_releases_nothing() {
        let before = stats::snapshot();
        {
            let mut a = OwningBuffer::sized(8).unwrap();
            let _b = a.take();
            // `a` is empty here and must not release anything when dropped.
        }
        let delta = stats::snapshot().since(&before);
        assert_eq!(delta.allocations, 1);
        assert_eq!(delta.releases, 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let before = stats::snapshot();
        let mut buf = OwningBuffer::sized(3).unwrap();
        buf.clear();
        buf.clear();
        assert!(buf.is_empty());
        drop(buf);
        let delta = stats::snapshot().since(&before);
        assert_eq!(delta.releases, 1);
        assert!(delta.is_balanced());
    }

    #[test]
    fn test_display() {
        let buf = OwningBuffer::sized(5).unwrap();
        let s = buf.to_string();
        assert!(s.contains("5 elements @ 0x"));
        assert_eq!(OwningBuffer::new().to_string(), "OwningBuffer(empty)");
    }

    #[test]
    fn test_storage_id_display() {
        let id = StorageId(0x1000);
        assert_eq!(id.to_string(), "0x1000");
        assert_eq!(id.addr(), 0x1000);
    }
}
