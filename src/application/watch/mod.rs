//! Watch Use Case
//!
//! Continuous mirroring while the source tree changes:
//! - File system monitoring (via `notify` crate)
//! - Relevance filter (documents, directories and shared images; hidden paths skipped)
//! - Content-hash filter against editor save noise
//! - Debouncing (2s default, configurable)
//! - One full engine run per quiet period
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new(sync_options);
//! let use_case = WatchUseCase::new(options);
//! use_case.start(running, |event| { ... });
//! ```

mod event;
mod use_case;

#[cfg(test)]
mod tests;

pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::WatchUseCase;
