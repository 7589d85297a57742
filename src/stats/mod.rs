//! Per-thread lifecycle accounting.
//!
//! Every buffer operation that allocates, copies, moves or releases storage
//! reports a [`Lifecycle`] event here. Events bump thread-local counters and
//! emit a `trace!` line on the `movebuf::lifecycle` target, so the cost of a
//! copy-swap versus a move-swap can be both counted and watched.
//!
//! Counters are thread-local: a thread only sees the buffers it created,
//! copied, moved or dropped itself.

use std::cell::Cell;
use std::fmt;

/// Log target used for lifecycle trace lines.
pub const LOG_TARGET: &str = "movebuf::lifecycle";

/// Snapshot of the lifecycle counters of the current thread.
///
/// # Example
///
/// ```
/// use movebuf::{OwningBuffer, stats};
///
/// let before = stats::snapshot();
/// {
///     let a = OwningBuffer::sized(4)?;
///     let _b = a.try_clone()?;
/// }
/// let delta = stats::snapshot().since(&before);
/// assert_eq!(delta.allocations, 2);
/// assert_eq!(delta.releases, 2);
/// assert!(delta.is_balanced());
/// # Ok::<(), movebuf::BufferError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LifecycleStats {
    /// Storage allocations performed.
    pub allocations: u64,
    /// Storage releases performed.
    pub releases: u64,
    /// Copy constructions and copy assignments.
    pub copies: u64,
    /// Move constructions and move assignments.
    pub moves: u64,
    /// Elements duplicated by copies.
    pub elements_copied: u64,
}

impl LifecycleStats {
    /// Allocations that have not been released yet.
    pub fn live(&self) -> u64 {
        self.allocations.saturating_sub(self.releases)
    }

    /// Returns true if every allocation has been released.
    pub fn is_balanced(&self) -> bool {
        self.allocations == self.releases
    }

    /// Counter delta between `earlier` and `self`.
    pub fn since(&self, earlier: &LifecycleStats) -> LifecycleStats {
        LifecycleStats {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            releases: self.releases.saturating_sub(earlier.releases),
            copies: self.copies.saturating_sub(earlier.copies),
            moves: self.moves.saturating_sub(earlier.moves),
            elements_copied: self
                .elements_copied
                .saturating_sub(earlier.elements_copied),
        }
    }
}

impl fmt::Display for LifecycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "allocations={} releases={} copies={} moves={} elements_copied={}",
            self.allocations, self.releases, self.copies, self.moves, self.elements_copied
        )
    }
}

/// A buffer lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lifecycle {
    /// Sized construction; allocates when `len > 0`.
    Construct { len: usize },
    /// Copy construction of `len` elements.
    CopyConstruct { len: usize },
    /// Copy assignment of `len` elements.
    CopyAssign { len: usize },
    /// Ownership of `len` elements adopted by a new instance.
    MoveConstruct { len: usize },
    /// Ownership of `len` elements adopted by an existing instance.
    MoveAssign { len: usize },
    /// Owned storage of `len` elements released.
    Release { len: usize },
    /// An instance owning nothing was dropped.
    DropEmpty,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Construct { len: 0 } => write!(f, "sized: len=0 nothing to allocate"),
            Lifecycle::Construct { len } => write!(f, "sized: len={} allocating", len),
            Lifecycle::CopyConstruct { len } => {
                write!(f, "copy construct: len={} copying resource", len)
            }
            Lifecycle::CopyAssign { len } => {
                write!(f, "copy assign: len={} copying resource", len)
            }
            Lifecycle::MoveConstruct { len } => {
                write!(f, "move construct: len={} moving resource", len)
            }
            Lifecycle::MoveAssign { len } => {
                write!(f, "move assign: len={} moving resource", len)
            }
            Lifecycle::Release { len } => write!(f, "drop: len={} releasing storage", len),
            Lifecycle::DropEmpty => write!(f, "drop: len=0 nothing owned"),
        }
    }
}

thread_local! {
    static THREAD_STATS: Cell<LifecycleStats> = const {
        Cell::new(LifecycleStats {
            allocations: 0,
            releases: 0,
            copies: 0,
            moves: 0,
            elements_copied: 0,
        })
    };
}

/// Records an event on the current thread and traces it.
pub(crate) fn record(event: Lifecycle) {
    log::trace!(target: LOG_TARGET, "{}", event);

    THREAD_STATS.with(|cell| {
        let mut stats = cell.get();
        match event {
            Lifecycle::Construct { len } => {
                if len > 0 {
                    stats.allocations += 1;
                }
            }
            Lifecycle::CopyConstruct { len } | Lifecycle::CopyAssign { len } => {
                stats.copies += 1;
                stats.elements_copied += len as u64;
                if len > 0 {
                    stats.allocations += 1;
                }
            }
            Lifecycle::MoveConstruct { .. } | Lifecycle::MoveAssign { .. } => {
                stats.moves += 1;
            }
            Lifecycle::Release { .. } => {
                stats.releases += 1;
            }
            Lifecycle::DropEmpty => {}
        }
        cell.set(stats);
    });
}

/// Returns the current thread's counters.
pub fn snapshot() -> LifecycleStats {
    THREAD_STATS.with(Cell::get)
}

/// Resets the current thread's counters to zero.
///
/// Buffers still alive keep their storage; releasing them afterwards makes
/// `releases` exceed `allocations`. Prefer [`LifecycleStats::since`] when
/// measuring a region.
pub fn reset() {
    THREAD_STATS.with(|cell| cell.set(LifecycleStats::default()));
}
