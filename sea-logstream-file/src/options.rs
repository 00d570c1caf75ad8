use std::path::{Path, PathBuf};

pub const DEFAULT_PREFIX: &str = "logstream-";

#[derive(Debug, Clone)]
/// Options for creating a [`crate::LogStream`].
pub struct LogStreamOptions {
    dir: PathBuf,
    prefix: String,
    remove_on_drop: bool,
    sync_on_write: bool,
}

impl Default for LogStreamOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::new(),
            prefix: DEFAULT_PREFIX.to_owned(),
            remove_on_drop: false,
            sync_on_write: false,
        }
    }
}

impl LogStreamOptions {
    pub fn new<P: AsRef<Path>>(dir: P, prefix: &str) -> Self {
        Self {
            dir: dir.as_ref().to_owned(),
            prefix: prefix.to_owned(),
            ..Default::default()
        }
    }

    /// Directory to create the backing file in. Empty means the system temp directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    pub fn set_dir<P: AsRef<Path>>(&mut self, dir: P) -> &mut Self {
        self.dir = dir.as_ref().to_owned();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
    pub fn set_prefix(&mut self, prefix: &str) -> &mut Self {
        self.prefix = prefix.to_owned();
        self
    }

    /// Whether the backing file is removed when the `LogStream` is dropped.
    /// By default, the file is left for the caller to clean up.
    pub fn remove_on_drop(&self) -> bool {
        self.remove_on_drop
    }
    pub fn set_remove_on_drop(&mut self, v: bool) -> &mut Self {
        self.remove_on_drop = v;
        self
    }

    /// Whether every append is followed by `sync_data` before readers are woken.
    pub fn sync_on_write(&self) -> bool {
        self.sync_on_write
    }
    pub fn set_sync_on_write(&mut self, v: bool) -> &mut Self {
        self.sync_on_write = v;
        self
    }
}
