//! Bulk allocation timing runs.
//!
//! A bulk run pushes many freshly sized buffers into a growing `Vec`, then
//! drops them all. It measures how long the fill takes and reports the
//! lifecycle counters of the run, which must balance.

use std::fmt;
use std::time::{Duration, Instant};

use crate::buffer::OwningBuffer;
use crate::config::BulkConfig;
use crate::error::BufferError;
use crate::stats::{self, LifecycleStats};

/// Outcome of a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkReport {
    /// Number of buffers that were stored.
    pub instances: usize,
    /// Time spent filling the vector; excludes the final release.
    pub elapsed: Duration,
    /// Counter delta over the whole run, release included.
    pub stats: LifecycleStats,
}

impl fmt::Display for BulkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} buffers in {:.3} sec ({})",
            self.instances,
            self.elapsed.as_secs_f64(),
            self.stats
        )
    }
}

/// Fills a vector with `config.count()` buffers of `config.buffer_len()`
/// elements, then drops them.
///
/// # Errors
///
/// Returns the config validation error, or the first allocation failure.
/// Buffers created before a failure are still released.
///
/// # Example
///
/// ```
/// use movebuf::{BulkConfig, run_bulk};
///
/// let report = run_bulk(&BulkConfig::new(100, 8)?)?;
/// assert_eq!(report.instances, 100);
/// assert_eq!(report.stats.allocations, 100);
/// assert_eq!(report.stats.releases, 100);
/// # Ok::<(), movebuf::BufferError>(())
/// ```
pub fn run_bulk(config: &BulkConfig) -> Result<BulkReport, BufferError> {
    run(config, false)
}

/// Like [`run_bulk`], but every buffer is moved into a new owner before it
/// is stored. The moved-from buffers release nothing, so the counters
/// balance at the same totals.
pub fn run_bulk_with_moves(config: &BulkConfig) -> Result<BulkReport, BufferError> {
    run(config, true)
}

fn run(config: &BulkConfig, with_moves: bool) -> Result<BulkReport, BufferError> {
    config.validate()?;

    log::debug!(
        "bulk run: {} buffers of {} elements (moves: {})",
        config.count(),
        config.buffer_len(),
        with_moves
    );

    let before = stats::snapshot();
    let start = Instant::now();

    let mut buffers = Vec::new();
    for _ in 0..config.count() {
        let buffer = if with_moves {
            let mut source = OwningBuffer::sized(config.buffer_len())?;
            source.take()
        } else {
            OwningBuffer::sized(config.buffer_len())?
        };
        buffers.push(buffer);
    }

    let elapsed = start.elapsed();
    let instances = buffers.len();
    drop(buffers);

    let report = BulkReport {
        instances,
        elapsed,
        stats: stats::snapshot().since(&before),
    };
    log::info!("bulk run finished: {}", report);

    Ok(report)
}
