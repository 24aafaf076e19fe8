//! File access for the project's version sources

use std::io;
use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

/// Trait for reading project files that may not exist
#[cfg_attr(test, automock)]
pub trait FileReader: Send + Sync {
    /// Read a file relative to the project root
    ///
    /// # Returns
    /// * `Ok(Some(content))` - The file exists
    /// * `Ok(None)` - The file does not exist
    /// * `Err(io::Error)` - The file exists but could not be read
    fn read_if_exists(&self, rel_path: &str) -> io::Result<Option<String>>;
}

/// Reads files from a directory on disk
pub struct FsFileReader {
    root: PathBuf,
}

impl FsFileReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileReader for FsFileReader {
    fn read_if_exists(&self, rel_path: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.root.join(rel_path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_if_exists_returns_content_of_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(".fvm")).unwrap();
        std::fs::write(
            temp_dir.path().join(".fvm/fvm_config.json"),
            r#"{"flutterSdkVersion": "3.7.12"}"#,
        )
        .unwrap();

        let reader = FsFileReader::new(temp_dir.path());
        let content = reader.read_if_exists(".fvm/fvm_config.json").unwrap();

        assert_eq!(content.as_deref(), Some(r#"{"flutterSdkVersion": "3.7.12"}"#));
    }

    #[test]
    fn read_if_exists_returns_none_for_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = FsFileReader::new(temp_dir.path());

        assert_eq!(reader.read_if_exists(".tool-versions").unwrap(), None);
        assert_eq!(reader.read_if_exists(".fvm/fvm_config.json").unwrap(), None);
    }

    #[test]
    fn read_if_exists_returns_error_for_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("pubspec.lock")).unwrap();
        let reader = FsFileReader::new(temp_dir.path());

        assert!(reader.read_if_exists("pubspec.lock").is_err());
    }
}
