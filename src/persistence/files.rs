use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of a project-local data directory
pub const LOCAL_DIR_NAME: &str = ".taken";

/// Resolve the data directory.
///
/// An explicit override wins; otherwise a local `.taken` directory found by
/// walking up from the current directory, then the platform data directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let current_dir = env::current_dir()?;
    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir);
    }

    let data = dirs::data_dir()
        .ok_or_else(|| Error::DataDir("no platform data directory".to_string()))?;
    Ok(data.join("taken"))
}

/// Find a local .taken directory by walking up the directory tree
pub fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(LOCAL_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Create `dir` if it does not exist yet
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Initialize a local .taken directory inside `parent`
pub fn init_local_dir(parent: &Path) -> Result<PathBuf> {
    let dir = parent.join(LOCAL_DIR_NAME);

    if dir.exists() {
        return Err(Error::DataDir(format!(
            "directory already exists: {}",
            dir.display()
        )));
    }

    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .ok_or_else(|| Error::DataDir(format!("{} has no parent directory", path.display())))?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|source| Error::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Read file content, `None` if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = resolve_data_dir(Some(temp_dir.path())).unwrap();
        assert_eq!(dir, temp_dir.path());
    }

    #[test]
    fn test_find_local_dir_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local = temp_dir.path().join(LOCAL_DIR_NAME);
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&local).unwrap();
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_dir(&nested), Some(local));
    }

    #[test]
    fn test_init_local_dir_refuses_existing() {
        let temp_dir = tempfile::tempdir().unwrap();

        let dir = init_local_dir(temp_dir.path()).unwrap();
        assert!(dir.is_dir());
        assert!(init_local_dir(temp_dir.path()).is_err());
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "[1,2]").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[1,2]"));

        atomic_write(&test_file, "[]").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_file(&test_file).unwrap(), None);
    }
}
