use std::{
    fs::File,
    io::{self, Write},
    path::Path,
    sync::Arc,
};

use crate::{
    signal::Signal, AsyncLogReader, FileErr, FileId, FileResult, LogReader, LogStreamOptions,
};

/// The writing end of a file-backed byte stream.
///
/// Bytes are appended to a uniquely named file; every append and the final
/// [`LogStream::close`] wake up all readers waiting for more. There is exactly
/// one writer: [`LogStream::write`] takes `&mut self`. Readers are opened with
/// [`LogStream::open_reader`], or from other threads through a [`StreamHandle`].
///
/// Dropping the stream closes it. The backing file is left in place unless
/// [`LogStreamOptions::set_remove_on_drop`] is set.
#[derive(Debug)]
pub struct LogStream {
    file: File,
    handle: StreamHandle,
    options: LogStreamOptions,
    bytes_written: u64,
}

/// A cloneable, thread-safe reference to a [`LogStream`] for opening readers.
/// It does not keep the stream open.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    file_id: FileId,
    signal: Arc<Signal>,
}

impl LogStream {
    /// Create a stream backed by a new file `{prefix}{random}` under `dir`.
    /// An empty `dir` means the system temp directory.
    pub fn create<P: AsRef<Path>>(dir: P, prefix: &str) -> FileResult<Self> {
        Self::create_with(LogStreamOptions::new(dir, prefix))
    }

    pub fn create_with(options: LogStreamOptions) -> FileResult<Self> {
        let (file_id, file) = FileId::create_unique(options.dir(), options.prefix())?;
        log::debug!("LogStream created ({})", file_id.path());
        Ok(Self {
            file,
            handle: StreamHandle {
                file_id,
                signal: Arc::new(Signal::new()),
            },
            options,
            bytes_written: 0,
        })
    }

    /// Append all of `bytes` and wake up the readers.
    ///
    /// Returns [`FileErr::StreamClosed`] if the stream has been closed. If the
    /// append itself fails, the stream is closed before the error is returned,
    /// so that readers end instead of waiting forever.
    pub fn write(&mut self, bytes: &[u8]) -> FileResult<usize> {
        if self.is_closed() {
            return Err(FileErr::StreamClosed);
        }
        if bytes.is_empty() {
            return Ok(0);
        }
        if let Err(e) = self.append(bytes) {
            log::error!("Failed to append to {}: {e}", self.file_id());
            self.close();
            return Err(FileErr::IoError(e));
        }
        self.bytes_written += bytes.len() as u64;
        self.handle.signal.notify();
        Ok(bytes.len())
    }

    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes)?;
        if self.options.sync_on_write() {
            self.file.sync_data()?;
        }
        Ok(())
    }

    /// Mark the end of stream. Idempotent.
    pub fn close(&self) {
        if self.handle.signal.close() {
            log::debug!(
                "LogStream closed ({}, {} bytes)",
                self.file_id().path(),
                self.bytes_written
            );
        }
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }

    pub fn file_id(&self) -> &FileId {
        self.handle.file_id()
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn options(&self) -> &LogStreamOptions {
        &self.options
    }

    pub fn handle(&self) -> StreamHandle {
        self.handle.clone()
    }

    /// Open a new reader at the beginning of the stream.
    pub fn open_reader(&self) -> FileResult<LogReader> {
        self.handle.open_reader()
    }

    /// Open a new async reader at the beginning of the stream.
    pub async fn open_async_reader(&self) -> FileResult<AsyncLogReader> {
        self.handle.open_async_reader().await
    }
}

impl StreamHandle {
    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }

    pub fn is_closed(&self) -> bool {
        self.signal.is_closed()
    }

    /// Fails if the backing file can no longer be opened, e.g. it has been removed.
    pub fn open_reader(&self) -> FileResult<LogReader> {
        let file = File::open(self.file_id.path())?;
        Ok(LogReader::new(file, self.signal.clone()))
    }

    pub async fn open_async_reader(&self) -> FileResult<AsyncLogReader> {
        AsyncLogReader::open(self.file_id.clone(), self.signal.clone()).await
    }
}

impl Write for LogStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        LogStream::write(self, buf).map_err(|e| match e {
            FileErr::IoError(e) => e,
            e => io::Error::new(io::ErrorKind::BrokenPipe, e),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for LogStream {
    fn drop(&mut self) {
        self.close();
        if self.options.remove_on_drop() {
            if let Err(e) = std::fs::remove_file(self.file_id().path()) {
                log::warn!("Failed to remove {}: {e}", self.file_id());
            }
        }
    }
}
