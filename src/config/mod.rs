//! Configuration for the demo driver and bulk runs.
//!
//! - [`BulkConfig`] - how many buffers a bulk run allocates, and how large
//! - [`DemoConfig`] - tracing and optional bulk run, loadable from the environment
//!
//! # Example
//!
//! ```
//! use movebuf::{BulkConfig, DemoConfig};
//!
//! let bulk = BulkConfig::new(1000, 64)?;
//! let config = DemoConfig::default().with_trace(true).with_bulk(Some(bulk));
//! assert!(config.trace());
//! # Ok::<(), movebuf::BufferError>(())
//! ```

use crate::buffer::MAX_LEN;
use crate::error::BufferError;

/// Default number of buffers in a bulk run.
pub const DEFAULT_BULK_COUNT: usize = 1_100_000;

/// Default element count of each buffer in a bulk run.
pub const DEFAULT_BULK_LEN: usize = 1000;

/// Environment variable enabling lifecycle tracing.
pub const ENV_TRACE: &str = "MOVEBUF_TRACE";

/// Environment variable enabling a bulk run with the given instance count.
pub const ENV_BULK_COUNT: &str = "MOVEBUF_BULK_COUNT";

/// Environment variable overriding the element count of bulk buffers.
pub const ENV_BULK_LEN: &str = "MOVEBUF_BULK_LEN";

/// Size of a bulk allocation run.
///
/// Constraints: `count > 0` and `1 <= len <= MAX_LEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulkConfig {
    count: usize,
    len: usize,
}

impl BulkConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if `count` is zero or `len` is zero or above `MAX_LEN`.
    pub fn new(count: usize, len: usize) -> Result<Self, BufferError> {
        if count == 0 {
            return Err(BufferError::InvalidConfig {
                message: "bulk count must be non-zero",
            });
        }

        if len == 0 {
            return Err(BufferError::InvalidConfig {
                message: "bulk buffer length must be non-zero",
            });
        }

        if len > MAX_LEN {
            return Err(BufferError::InvalidConfig {
                message: "bulk buffer length exceeds MAX_LEN",
            });
        }

        Ok(Self { count, len })
    }

    /// Sets the instance count. Not validated; see [`BulkConfig::validate`].
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the per-buffer length. Not validated; see [`BulkConfig::validate`].
    pub fn with_buffer_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Returns the number of buffers to allocate.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the element count of each buffer.
    pub fn buffer_len(&self) -> usize {
        self.len
    }

    /// Returns the total number of elements across all buffers.
    pub fn total_elements(&self) -> usize {
        self.count.saturating_mul(self.len)
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(self.count, self.len).map(|_| ())
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_BULK_COUNT,
            len: DEFAULT_BULK_LEN,
        }
    }
}

/// Settings of the demo driver.
///
/// Tracing is off and no bulk run happens by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DemoConfig {
    trace: bool,
    bulk: Option<BulkConfig>,
}

impl DemoConfig {
    /// Reads the configuration from the process environment.
    ///
    /// See [`DemoConfig::from_lookup`] for the recognized variables.
    pub fn from_env() -> Result<Self, BufferError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// - `MOVEBUF_TRACE`: `1`, `true`, `yes` or `on` enables tracing;
    ///   `0`, `false`, `no`, `off` or empty disables it
    /// - `MOVEBUF_BULK_COUNT`: enables a bulk run of that many buffers
    /// - `MOVEBUF_BULK_LEN`: element count per bulk buffer (default 1000);
    ///   ignored without `MOVEBUF_BULK_COUNT`
    ///
    /// # Example
    ///
    /// ```
    /// use movebuf::DemoConfig;
    ///
    /// let config = DemoConfig::from_lookup(|key| match key {
    ///     "MOVEBUF_TRACE" => Some("yes".to_string()),
    ///     "MOVEBUF_BULK_COUNT" => Some("500".to_string()),
    ///     _ => None,
    /// })?;
    /// assert!(config.trace());
    /// assert_eq!(config.bulk().map(|b| b.count()), Some(500));
    /// # Ok::<(), movebuf::BufferError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BufferError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let trace = match lookup(ENV_TRACE) {
            Some(value) => parse_flag(&value)?,
            None => false,
        };

        let bulk = match lookup(ENV_BULK_COUNT) {
            Some(count) => {
                let count =
                    parse_usize(&count, "MOVEBUF_BULK_COUNT must be an unsigned integer")?;
                let len = match lookup(ENV_BULK_LEN) {
                    Some(len) => {
                        parse_usize(&len, "MOVEBUF_BULK_LEN must be an unsigned integer")?
                    }
                    None => DEFAULT_BULK_LEN,
                };
                Some(BulkConfig::new(count, len)?)
            }
            None => None,
        };

        Ok(Self { trace, bulk })
    }

    /// Enables or disables lifecycle tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Sets the bulk run, or disables it with `None`.
    pub fn with_bulk(mut self, bulk: Option<BulkConfig>) -> Self {
        self.bulk = bulk;
        self
    }

    /// Returns true if lifecycle tracing is enabled.
    pub fn trace(&self) -> bool {
        self.trace
    }

    /// Returns the bulk run configuration, if enabled.
    pub fn bulk(&self) -> Option<BulkConfig> {
        self.bulk
    }
}

fn parse_flag(value: &str) -> Result<bool, BufferError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BufferError::InvalidConfig {
            message: "MOVEBUF_TRACE must be a boolean flag",
        }),
    }
}

fn parse_usize(value: &str, message: &'static str) -> Result<usize, BufferError> {
    value
        .trim()
        .parse()
        .map_err(|_| BufferError::InvalidConfig { message })
}
