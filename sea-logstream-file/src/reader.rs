use std::{
    fs::File,
    io::{self, Read},
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    signal::{Signal, Wake},
    FileErr, FileResult,
};

pub const BUFFER_SIZE: usize = 1024;

/// `LogReader` follows a [`crate::LogStream`] like `tail -f`, from the very beginning.
///
/// It has its own file handle and cursor, so readers never interfere with each other
/// or with the writer. [`LogReader::read`] blocks the current thread while there is
/// nothing new, and returns [`FileErr::StreamEnded`] only after the stream is closed
/// and every byte has been returned.
///
/// For use inside an async runtime, see [`crate::AsyncLogReader`].
#[derive(Debug)]
pub struct LogReader {
    file: File,
    signal: Arc<Signal>,
    offset: u64,
}

impl LogReader {
    pub(crate) fn new(file: File, signal: Arc<Signal>) -> Self {
        Self {
            file,
            signal,
            offset: 0,
        }
    }

    /// Read up to `buf.len()` bytes, blocking until there is at least one byte
    /// or the stream has ended.
    ///
    /// A read that returns bytes never reports the end; that is left to the next call.
    /// An empty `buf` returns 0 immediately.
    pub fn read(&mut self, buf: &mut [u8]) -> FileResult<usize> {
        self.read_until(buf, None)
    }

    /// Like [`LogReader::read`], but gives up with [`FileErr::Timeout`] if the stream
    /// stays idle and open for `timeout`. A timeout too large to be represented
    /// as an `Instant` waits without limit.
    pub fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> FileResult<usize> {
        self.read_until(buf, Instant::now().checked_add(timeout))
    }

    /// Like [`LogReader::read`], but gives up with [`FileErr::Timeout`] at `deadline`.
    /// Data already available is returned even if the deadline has passed.
    pub fn read_deadline(&mut self, buf: &mut [u8], deadline: Instant) -> FileResult<usize> {
        self.read_until(buf, Some(deadline))
    }

    fn read_until(&mut self, buf: &mut [u8], deadline: Option<Instant>) -> FileResult<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            // must be taken before reading the file
            let seen = self.signal.generation();
            match self.file.read(buf) {
                Ok(0) => (),
                Ok(n) => {
                    self.offset += n as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FileErr::IoError(e)),
            }
            match self.signal.wait(seen, deadline) {
                Wake::Changed => log::trace!("LogReader wake @{}", self.offset),
                Wake::Ended => return Err(FileErr::StreamEnded),
                Wake::TimedOut => return Err(FileErr::Timeout),
            }
        }
    }

    /// Read until the stream ends, appending everything to `out`.
    /// Returns the number of bytes appended.
    pub fn read_to_end(&mut self, out: &mut Vec<u8>) -> FileResult<usize> {
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut total = 0;
        loop {
            match self.read(&mut buffer) {
                Ok(n) => {
                    out.extend_from_slice(&buffer[..n]);
                    total += n;
                }
                Err(FileErr::StreamEnded) => return Ok(total),
                Err(e) => return Err(e),
            }
        }
    }

    /// Number of bytes read so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_closed(&self) -> bool {
        self.signal.is_closed()
    }
}

/// End of stream is `Ok(0)`, so a `LogReader` works with `io::copy`, `BufReader` etc.
impl Read for LogReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match LogReader::read(self, buf) {
            Ok(n) => Ok(n),
            Err(FileErr::StreamEnded) => Ok(0),
            Err(FileErr::IoError(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}
