use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Create a directory and any missing parents.
pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .context(format!("Unable to create directory {}", path.display()))
}

/// Resolve a path to its canonical, absolute form.
pub(crate) fn canonicalize(path: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let path = path.as_ref();
    std::fs::canonicalize(path).context(format!("Unable to canonicalize {}", path.display()))
}

/// Write a file.
pub(crate) fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).context(format!("Unable to write to {}", path.display()))
}

/// Read a file to a `String`.
pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).context(format!("Unable to read file {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub(crate) fn deserialize<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = read_to_string(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Copy a file. `to` is overwritten if it exists.
pub(crate) fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    std::fs::copy(from.as_ref(), to.as_ref())
        .map(|_| ())
        .with_context(|| {
            format!(
                "Unable to copy file from '{}' to '{}'",
                from.as_ref().display(),
                to.as_ref().display()
            )
        })
}

/// Iterate a directory's entries.
pub(crate) fn read_dir(path: impl AsRef<Path>) -> Result<std::fs::ReadDir> {
    let path = path.as_ref();
    std::fs::read_dir(path).context(format!("Unable to read directory {}", path.display()))
}

/// Delete a file.
pub(crate) fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::remove_file(path).context(format!("Unable to remove file {}", path.display()))
}
