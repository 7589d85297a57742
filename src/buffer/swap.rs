//! Swap strategies built on the copy and move primitives.
//!
//! Both strategies exchange the contents of two buffers. They differ only in
//! cost: [`OwningBuffer::copy_swap`] performs three deep copies, while
//! [`OwningBuffer::move_swap`] only transfers ownership.

use super::OwningBuffer;
use crate::error::BufferError;

impl OwningBuffer {
    /// Exchanges contents by copying: `temp = copy(other)`,
    /// `other = copy(self)`, `self = copy(temp)`.
    ///
    /// With two non-empty buffers this performs three allocations and three
    /// releases, and both buffers end up with fresh storage.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if any copy cannot obtain
    /// storage. Both buffers then hold their original contents.
    ///
    /// # Example
    ///
    /// ```
    /// use movebuf::OwningBuffer;
    ///
    /// let mut a = OwningBuffer::sized(2)?;
    /// let mut b = OwningBuffer::sized(5)?;
    /// let (old_a, old_b) = (a.storage_id(), b.storage_id());
    ///
    /// a.copy_swap(&mut b)?;
    ///
    /// assert_eq!(a.as_slice(), &[0, 1, 2, 3, 4]);
    /// assert_eq!(b.as_slice(), &[0, 1]);
    /// assert_ne!(a.storage_id(), old_a);
    /// assert_ne!(b.storage_id(), old_b);
    /// # Ok::<(), movebuf::BufferError>(())
    /// ```
    pub fn copy_swap(&mut self, other: &mut OwningBuffer) -> Result<(), BufferError> {
        let mut temp = other.try_clone()?;
        other.copy_assign(self)?;
        if let Err(err) = self.copy_assign(&temp) {
            // `temp` still holds the original contents of `other`.
            other.move_assign(&mut temp);
            return Err(err);
        }
        Ok(())
    }

    /// Exchanges contents by moving: `temp = move(other)`,
    /// `other = move(self)`, `self = move(temp)`.
    ///
    /// No allocation and no element copy takes place; each buffer ends up
    /// with the storage the other one had.
    ///
    /// # Example
    ///
    /// ```
    /// use movebuf::{OwningBuffer, stats};
    ///
    /// let mut a = OwningBuffer::sized(2)?;
    /// let mut b = OwningBuffer::sized(5)?;
    /// let (old_a, old_b) = (a.storage_id(), b.storage_id());
    ///
    /// let before = stats::snapshot();
    /// a.move_swap(&mut b);
    /// let delta = stats::snapshot().since(&before);
    ///
    /// assert_eq!(a.storage_id(), old_b);
    /// assert_eq!(b.storage_id(), old_a);
    /// assert_eq!(delta.allocations, 0);
    /// assert_eq!(delta.elements_copied, 0);
    /// # Ok::<(), movebuf::BufferError>(())
    /// ```
    pub fn move_swap(&mut self, other: &mut OwningBuffer) {
        let mut temp = other.take();
        other.move_assign(self);
        self.move_assign(&mut temp);
    }
}
