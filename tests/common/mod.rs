//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the directory being packed inside each test's temp dir, and so
/// the stem of the default output file.
pub const WORK_DIR: &str = "batch";

/// Builds a working directory with a driver and instance files
pub struct WorkDirBuilder {
    driver: Option<String>,
    files: Vec<(PathBuf, Vec<u8>)>,
    dirs: Vec<PathBuf>,
}

impl WorkDirBuilder {
    pub fn new() -> Self {
        Self {
            driver: Some("script.py".to_string()),
            files: Vec::new(),
            dirs: Vec::new(),
        }
    }

    /// Use a different driver name, or none at all
    pub fn with_driver(mut self, name: Option<&str>) -> Self {
        self.driver = name.map(String::from);
        self
    }

    /// Add an instance file with header `n`, `c` and the given payload
    pub fn with_instance(self, name: &str, n: i64, c: i64, payload: &str) -> Self {
        let content = format!("{n}\n{c}\n{payload}");
        self.with_file(name, content.as_bytes())
    }

    pub fn with_file(mut self, name: &str, content: &[u8]) -> Self {
        self.files.push((PathBuf::from(name), content.to_vec()));
        self
    }

    pub fn with_subdir(mut self, name: &str) -> Self {
        self.dirs.push(PathBuf::from(name));
        self
    }

    pub fn build(self) -> Result<WorkDir> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join(WORK_DIR);
        fs::create_dir(&root)?;

        if let Some(driver) = &self.driver {
            fs::write(root.join(driver), "# driver\n")?;
        }
        for (name, content) in &self.files {
            fs::write(root.join(name), content)?;
        }
        for dir in &self.dirs {
            fs::create_dir(root.join(dir))?;
        }

        Ok(WorkDir {
            _temp_dir: temp_dir,
            root,
        })
    }
}

/// A populated working directory, removed on drop
pub struct WorkDir {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl WorkDir {
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn default_output(&self) -> PathBuf {
        self.root.join(format!("{WORK_DIR}.txt"))
    }

    pub fn read_output(&self) -> Result<String> {
        Ok(fs::read_to_string(self.default_output())?)
    }
}
