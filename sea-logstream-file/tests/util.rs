use std::path::PathBuf;

pub fn temp_dir(name: &str) -> Result<PathBuf, std::io::Error> {
    let path = std::env::temp_dir().join(format!("sea-logstream-{name}"));
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    std::iter::repeat_with(|| fastrand::u8(..)).take(len).collect()
}
