//! ### `sea-logstream-runtime`: Async runtime abstraction
//!
//! A small set of functions aligning the type signatures between `async-std` and `tokio`,
//! so that the async half of `sea-logstream-file` is generic to both runtimes.
//!
//! Without a runtime feature, everything still compiles, but calls fail with
//! "Please enable a runtime".

#[cfg(all(feature = "runtime-async-std", feature = "runtime-tokio"))]
compile_error!("'runtime-async-std' and 'runtime-tokio' cannot be enabled at the same time");

#[cfg(feature = "file")]
pub mod file;
mod sleep;
mod task;
mod timeout;

pub use sleep::*;
pub use task::*;
pub use timeout::*;
