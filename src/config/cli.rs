use crate::core::Storage;
use crate::utils::error::{IndexError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filesystem storage. Relative paths resolve against `base_path`; absolute paths are used
/// as given.
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

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    /// Stages the bytes next to the destination and renames them into place, so readers see
    /// either the previous file or the complete new one. The parent directory must exist.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let parent = full_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(data)?;
        staged.as_file().sync_all()?;
        match_permissions(&staged, &full_path)?;

        staged
            .persist(&full_path)
            .map_err(|e| IndexError::IoError(e.error))?;
        Ok(())
    }
}

// NamedTempFile is created 0600; keep whatever mode the replaced file had.
fn match_permissions(staged: &NamedTempFile, destination: &Path) -> std::io::Result<()> {
    match fs::metadata(destination) {
        Ok(meta) => staged.as_file().set_permissions(meta.permissions()),
        Err(_) => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                staged
                    .as_file()
                    .set_permissions(fs::Permissions::from_mode(0o644))?;
            }
            Ok(())
        }
    }
}
