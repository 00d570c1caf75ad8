//! <div align="center">
//!
//!   <h1>SeaLogStream</h1>
//!
//!   <p>
//!     <strong>🌊 A file-backed byte stream with any number of tailing readers</strong>
//!   </p>
//!
//! </div>
//!
//! SeaLogStream lets one producer (say, the output of a long-running process) be followed by
//! any number of consumers, each at its own pace, without keeping the content in memory.
//!
//! ## Features
//!
//! 1. Tailing
//!
//! Readers start from the beginning at any time, before or after the writer is done. When they
//! catch up they wait for more, like `tail -f`, and they end exactly once the writer has closed
//! and every byte has been delivered.
//!
//! 2. Sync and Async
//!
//! [`LogReader`] blocks a thread, [`AsyncLogReader`] suspends a task. Async file IO works with
//! both `tokio` and `async-std`, selected by the `runtime-tokio` / `runtime-async-std` features.
//!
//! 3. No lost wake-ups
//!
//! Every append and the close are broadcast to all waiting readers under a single mutex, and a
//! reader only goes to sleep after re-checking under that same mutex.
//!
//! ## Architecture
//!
//! `sea-logstream` is the facade crate re-exporting implementation from a number of sub-crates:
//!
//! + [sea-logstream-file](https://github.com/SeaQL/sea-logstream/tree/main/sea-logstream-file)
//! + [sea-logstream-runtime](https://github.com/SeaQL/sea-logstream/tree/main/sea-logstream-runtime)

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use sea_logstream_file::*;

#[cfg(feature = "sea-logstream-runtime")]
#[cfg_attr(docsrs, doc(cfg(feature = "runtime")))]
pub use sea_logstream_runtime as runtime;
