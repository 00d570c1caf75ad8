use std::{sync::Arc, time::Duration};

use crate::{
    signal::{Signal, Subscription, Wake},
    FileErr, FileId, FileResult, BUFFER_SIZE,
};
use sea_logstream_runtime::{
    file::{AsyncReadExt, File},
    timeout,
};

/// The async version of [`crate::LogReader`].
///
/// Instead of blocking the thread, [`AsyncLogReader::read`] suspends until the
/// writer appends or closes. No lock is held while suspended, and the cursor only
/// advances on a completed read, so dropping a pending `read` future is a clean
/// cancellation.
///
/// File IO goes through `sea-logstream-runtime`, so enable either `runtime-tokio`
/// or `runtime-async-std`.
pub struct AsyncLogReader {
    file: File,
    file_id: FileId,
    signal: Arc<Signal>,
    offset: u64,
}

impl std::fmt::Debug for AsyncLogReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncLogReader")
            .field("file_id", &self.file_id)
            .field("offset", &self.offset)
            .finish()
    }
}

impl AsyncLogReader {
    pub(crate) async fn open(file_id: FileId, signal: Arc<Signal>) -> FileResult<Self> {
        let file = File::open(file_id.path())
            .await
            .map_err(FileErr::IoError)?;
        Ok(Self {
            file,
            file_id,
            signal,
            offset: 0,
        })
    }

    /// Read up to `buf.len()` bytes, waiting until there is at least one byte
    /// or the stream has ended.
    pub async fn read(&mut self, buf: &mut [u8]) -> FileResult<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let seen = self.signal.generation();
            match self.read_file(buf).await {
                Ok(0) => (),
                Ok(n) => {
                    self.offset += n as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FileErr::IoError(e)),
            }
            let receiver = match self.signal.subscribe(seen) {
                Subscription::Ready(Wake::Ended) => return Err(FileErr::StreamEnded),
                Subscription::Ready(_) => continue,
                Subscription::Pending(receiver) => receiver,
            };
            // the signal outlives us, so the waker is never dropped unsent
            receiver.recv_async().await.ok();
            log::trace!("AsyncLogReader wake @{}", self.offset);
        }
    }

    async fn read_file(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        #[cfg(feature = "runtime-async-std")]
        {
            // async-std does not resume from the cursor after hitting the end
            use sea_logstream_runtime::file::{AsyncSeekExt, SeekFrom};
            self.file.seek(SeekFrom::Start(self.offset)).await?;
        }
        self.file.read(buf).await
    }

    /// Like [`AsyncLogReader::read`], but gives up with [`FileErr::Timeout`] if the
    /// stream stays idle and open for `dur`.
    pub async fn read_timeout(&mut self, buf: &mut [u8], dur: Duration) -> FileResult<usize> {
        match timeout(dur, self.read(buf)).await {
            Ok(res) => res,
            Err(_) => Err(FileErr::Timeout),
        }
    }

    /// Read until the stream ends, appending everything to `out`.
    pub async fn read_to_end(&mut self, out: &mut Vec<u8>) -> FileResult<usize> {
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut total = 0;
        loop {
            match self.read(&mut buffer).await {
                Ok(n) => {
                    out.extend_from_slice(&buffer[..n]);
                    total += n;
                }
                Err(FileErr::StreamEnded) => return Ok(total),
                Err(e) => return Err(e),
            }
        }
    }

    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_closed(&self) -> bool {
        self.signal.is_closed()
    }
}
