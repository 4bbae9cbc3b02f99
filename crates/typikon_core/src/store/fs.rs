use super::library::FASTING_PATH as ROOT_MARKER;
use super::{ContentStore, StoreError, StoreResult};
use log::{error, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Documents read from a content directory.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Opens a content directory after checking it holds the marker document.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.join(ROOT_MARKER).is_file() {
            error!(
                "event=store_open module=store status=error mode=fs error_code=invalid_root root={}",
                root.display()
            );
            return Err(StoreError::InvalidRoot {
                root,
                expected: ROOT_MARKER.to_string(),
            });
        }

        info!(
            "event=store_open module=store status=ok mode=fs root={}",
            root.display()
        );
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |full, segment| full.join(segment))
    }
}

impl ContentStore for FsContentStore {
    fn has(&self, path: &str) -> StoreResult<bool> {
        Ok(self.resolve(path).is_file())
    }

    fn get(&self, path: &str) -> StoreResult<String> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    path: path.to_string(),
                }
            } else {
                StoreError::Io { path: full, source }
            }
        })
    }
}
