use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use crate::FileErr;

const SUFFIX_LEN: usize = 10;
const MAX_ATTEMPTS: usize = 100;

/// Identity of a stream: the path of its backing file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId {
    path: Arc<String>,
}

impl FileId {
    pub fn new<T: Into<String>>(path: T) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create a new, empty file named `{prefix}{random}` under `dir`, failing
    /// rather than reusing an existing file. An empty `dir` means the system
    /// temp directory.
    pub(crate) fn create_unique<P: AsRef<Path>>(
        dir: P,
        prefix: &str,
    ) -> Result<(Self, File), FileErr> {
        let dir = dir.as_ref();
        let dir: PathBuf = if dir.as_os_str().is_empty() {
            std::env::temp_dir()
        } else {
            dir.to_owned()
        };
        // `FileId` holds a `String`; a lossy conversion would point at another file
        if dir.to_str().is_none() {
            return Err(non_utf8(&dir));
        }

        let mut attempts = 0;
        loop {
            let name = format!("{prefix}{}", random_suffix());
            let path = dir.join(name);
            match OpenOptions::new().append(true).create_new(true).open(&path) {
                Ok(file) => {
                    let path = path.into_os_string().into_string().map_err(|path| {
                        std::fs::remove_file(&path).ok();
                        non_utf8(Path::new(&path))
                    })?;
                    return Ok((Self::new(path), file));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempts < MAX_ATTEMPTS => {
                    log::trace!("{} exists, retrying", path.display());
                    attempts += 1;
                }
                Err(e) => return Err(FileErr::IoError(e)),
            }
        }
    }
}

fn non_utf8(path: &Path) -> FileErr {
    FileErr::IoError(io::Error::new(
        ErrorKind::InvalidInput,
        format!("path is not valid UTF-8: {}", path.display()),
    ))
}

fn random_suffix() -> String {
    std::iter::repeat_with(fastrand::alphanumeric)
        .take(SUFFIX_LEN)
        .collect()
}

impl Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FileId({})", self.path)
    }
}

impl FromStr for FileId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.to_owned()))
    }
}

impl AsRef<Path> for FileId {
    fn as_ref(&self) -> &Path {
        Path::new(self.path())
    }
}
