//! One-time capture of a directory's entry names.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Entry names of a directory, captured once and sorted by raw name.
#[derive(Debug, Clone)]
pub struct Snapshot {
    root: PathBuf,
    entries: Vec<String>,
}

impl Snapshot {
    /// Read the entries of `root`, leaving out `skip` when given.
    ///
    /// `skip` is how the aggregate output keeps itself out of its own input
    /// when it is written inside `root`.
    pub fn capture(root: &Path, skip: Option<&OsStr>) -> Result<Self> {
        let read_dir_err = |source| Error::ReadDir {
            path: root.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(root).map_err(read_dir_err)? {
            let name = entry.map_err(read_dir_err)?.file_name();
            if skip.is_some_and(|s| s == name.as_os_str()) {
                trace!("Skipping output file {:?} in snapshot", name);
                continue;
            }
            entries.push(name.into_string().map_err(Error::NonUtf8Name)?);
        }

        // UTF-8 byte order matches code point order
        entries.sort();

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The count line value: every entry except one presumed driver.
    pub fn declared_count(&self) -> i64 {
        self.entries.len() as i64 - 1
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
