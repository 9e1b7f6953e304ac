use super::PersistenceAdapter;
use crate::error::{JotzError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed adapter: each key is stored as `<root>/<key>.json`.
pub struct FileAdapter {
    root: PathBuf,
}

impl FileAdapter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(JotzError::Io)?;
        }
        Ok(())
    }
}

impl PersistenceAdapter for FileAdapter {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(JotzError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.ensure_dir()?;

        // Write to a sibling tmp file then rename, so readers never see a partial blob
        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, blob).map_err(JotzError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.key_path(key)) {
            let _ = fs::remove_file(&tmp_file);
            return Err(JotzError::Io(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let adapter = FileAdapter::new(dir.path().to_path_buf());
        assert_eq!(adapter.read("notes").unwrap(), None);
    }

    #[test]
    fn write_creates_root_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("jotz");
        let adapter = FileAdapter::new(root.clone());

        adapter.write("notes", "[]").unwrap();
        assert!(root.join("notes.json").exists());
        assert_eq!(adapter.read("notes").unwrap().as_deref(), Some("[]"));

        adapter.write("notes", "[1]").unwrap();
        assert_eq!(adapter.read("notes").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn write_leaves_no_tmp_files_behind() {
        let dir = TempDir::new().unwrap();
        let adapter = FileAdapter::new(dir.path().to_path_buf());
        adapter.write("notes", "[]").unwrap();
        adapter.write("darkMode", "true").unwrap();

        for entry in fs::read_dir(dir.path()).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let adapter = FileAdapter::new(dir.path().to_path_buf());
        adapter.write("notes", "[]").unwrap();
        adapter.write("darkMode", "true").unwrap();

        assert_eq!(adapter.read("notes").unwrap().as_deref(), Some("[]"));
        assert_eq!(adapter.read("darkMode").unwrap().as_deref(), Some("true"));
    }
}
