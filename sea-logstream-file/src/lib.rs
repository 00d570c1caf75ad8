//! ### `sea-logstream-file`: File-backed tailing byte stream
//!
//! A [`LogStream`] is a single-writer, append-only byte stream stored in a file.
//! Any number of [`LogReader`]s (or [`AsyncLogReader`]s) can follow it like `tail -f`:
//! they start from the beginning, block when they have caught up, and end with
//! [`FileErr::StreamEnded`] once the writer has closed and every byte has been delivered.
//!
//! ```no_run
//! use sea_logstream_file::{FileErr, LogStream};
//!
//! # fn main() -> Result<(), FileErr> {
//! let mut stream = LogStream::create("", "build-")?;
//! let mut reader = stream.open_reader()?;
//!
//! stream.write(b"hello")?;
//! stream.close();
//!
//! let mut buf = [0u8; 16];
//! let n = reader.read(&mut buf)?;
//! assert_eq!(&buf[..n], b"hello");
//! assert!(matches!(reader.read(&mut buf), Err(FileErr::StreamEnded)));
//! # Ok(())
//! # }
//! ```

mod async_reader;
mod error;
mod file;
mod options;
mod reader;
mod signal;
mod stream;

pub use async_reader::*;
pub use error::*;
pub use file::*;
pub use options::*;
pub use reader::*;
pub use stream::*;

pub mod export {
    pub use flume;
}
