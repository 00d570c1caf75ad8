use super::SeekFrom;
use futures::future::{ready, Future, Ready};
use std::{
    fs::Metadata,
    io::{Error as IoError, ErrorKind},
    path::Path,
};

pub struct File;

pub trait AsyncReadExt {
    type Future: Future<Output = Result<usize, IoError>>;

    fn read(&mut self, _: &mut [u8]) -> Self::Future;
}

pub trait AsyncSeekExt {
    type Future: Future<Output = Result<u64, IoError>>;

    fn seek(&mut self, _: SeekFrom) -> Self::Future;
}

fn no_runtime() -> IoError {
    IoError::new(ErrorKind::Other, "Please enable a runtime")
}

impl File {
    pub async fn open<P: AsRef<Path>>(_: P) -> Result<Self, IoError> {
        Err(no_runtime())
    }

    pub async fn metadata(&self) -> Result<Metadata, IoError> {
        Err(no_runtime())
    }
}

impl AsyncReadExt for File {
    type Future = Ready<Result<usize, IoError>>;

    fn read(&mut self, _: &mut [u8]) -> Self::Future {
        ready(Err(no_runtime()))
    }
}

impl AsyncSeekExt for File {
    type Future = Ready<Result<u64, IoError>>;

    fn seek(&mut self, _: SeekFrom) -> Self::Future {
        ready(Err(no_runtime()))
    }
}
