use crate::core::Storage;
use crate::utils::error::{AmalgamateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 以 `base_path` 為根的本機檔案系統，相對路徑都從這裡解析
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| AmalgamateError::io(full_path, e))
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| AmalgamateError::io(parent, e))?;
        }

        fs::write(&full_path, data).map_err(|e| AmalgamateError::io(full_path, e))
    }

    async fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let pattern = crate::core::discovery::interface_pattern(&self.resolve(dir), extension);
        let options = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let mut files = Vec::new();
        for entry in glob::glob_with(&pattern, options)? {
            let path = entry.map_err(|e| {
                let source = std::io::Error::new(e.error().kind(), e.error().to_string());
                AmalgamateError::io(e.path(), source)
            })?;
            if !path.is_file() {
                continue;
            }
            // 回傳相對於 base_path 的路徑
            let relative = path
                .strip_prefix(&self.base_path)
                .map(Path::to_path_buf)
                .unwrap_or(path);
            files.push(relative);
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_files_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::write(root.join("src/a.h"), "a").unwrap();
        fs::write(root.join("src/a.c"), "a").unwrap();
        fs::write(root.join("src/.hidden.h"), "h").unwrap();
        fs::write(root.join("src/nested/b.h"), "b").unwrap();
        fs::create_dir_all(root.join("src/dir.h")).unwrap();

        let storage = LocalStorage::new(root);
        let files = storage.list_files(Path::new("src"), "h").await.unwrap();

        assert_eq!(files, vec![PathBuf::from("src/a.h")]);
    }

    #[tokio::test]
    async fn test_list_files_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let files = storage.list_files(Path::new("src"), "h").await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let err = storage
            .read_file(Path::new("LICENSE"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_write_creates_parent_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let path = Path::new("out/foo.h");

        storage.write_file(path, b"first").await.unwrap();
        storage.write_file(path, b"second").await.unwrap();

        let contents = storage.read_file(path).await.unwrap();
        assert_eq!(contents, b"second");
    }

    #[tokio::test]
    async fn test_read_file_keeps_non_utf8_bytes() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("latin1.c"), b"caf\xe9\n").unwrap();

        let storage = LocalStorage::new(temp_dir.path());
        let contents = storage.read_file(Path::new("latin1.c")).await.unwrap();
        assert_eq!(contents, b"caf\xe9\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_files_unreadable_entry_is_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("src");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("a.h"), "a").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let storage = LocalStorage::new(temp_dir.path());
        let result = storage.list_files(Path::new("src"), "h").await;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // root 不受權限限制，此時列得出檔案
        if let Err(err) = result {
            assert!(matches!(err, AmalgamateError::IoError { .. }));
        }
    }
}
