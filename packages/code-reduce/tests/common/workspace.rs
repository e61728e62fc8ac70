//! Scratch directory holding the files under reduction

use std::fs;
use std::path::{Path, PathBuf};

use code_reduce::OracleError;
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }
}

/// Oracle passing while `file` contains every needle
pub fn contains_all(
    file: &Path,
    needles: &[&str],
) -> impl FnMut(&Path) -> Result<bool, OracleError> {
    let file = file.to_path_buf();
    let needles: Vec<String> = needles.iter().map(|s| s.to_string()).collect();
    move |_: &Path| {
        let text = fs::read_to_string(&file).map_err(|e| OracleError::Other(e.to_string()))?;
        Ok(needles.iter().all(|n| text.contains(n.as_str())))
    }
}
