use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileErr {
    #[error("IO Error: {0}")]
    IoError(#[source] std::io::Error),
    /// Write after the stream has been closed.
    #[error("Stream Closed")]
    StreamClosed,
    /// Not a failure: the stream is closed and every byte has been read.
    #[error("Stream Ended")]
    StreamEnded,
    #[error("Timeout")]
    Timeout,
}

pub type FileResult<T> = Result<T, FileErr>;

impl FileErr {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::StreamEnded)
    }
}

impl From<std::io::Error> for FileErr {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}
