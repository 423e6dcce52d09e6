//! Directory packing
//!
//! Turns a directory holding one driver file and any number of instance
//! files into a single aggregate file named after the directory.
//!
//! # Architecture
//!
//! - [`Snapshot`] - sorted entry names, captured once per run
//! - [`ExcludeRules`] - decides which entries are drivers, not instances
//! - [`instance`] - header parsing and label derivation
//! - [`BundleWriter`] - emits the aggregate format
//!
//! # Examples
//!
//! ```rust,no_run
//! use instpack::pack::{pack, PackOptions};
//!
//! # fn example() -> instpack::Result<()> {
//! let summary = pack(&PackOptions::new("runs/batch-7"))?;
//! println!("wrote {} instances to {}", summary.instances, summary.output.display());
//! # Ok(())
//! # }
//! ```

pub mod exclude;
pub mod instance;
pub mod snapshot;
pub mod writer;

pub use exclude::{ExcludeRule, ExcludeRules};
pub use instance::{
    label_for, parse_instance, HeaderInt, Instance, InstanceError, InstanceHeader,
};
pub use snapshot::Snapshot;
pub use writer::{BundleWriter, DEFAULT_PLACEHOLDER};

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension of the aggregate file when nothing else is configured.
pub const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Directory holding the driver and instance files.
    pub root: PathBuf,
    /// Explicit output path; defaults to `<root>/<root name>.<extension>`.
    pub output: Option<PathBuf>,
    pub exclude: ExcludeRules,
    pub placeholder: i64,
    pub extension: String,
}

impl PackOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: None,
            exclude: ExcludeRules::default(),
            placeholder: DEFAULT_PLACEHOLDER,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_exclude(mut self, exclude: ExcludeRules) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_placeholder(mut self, placeholder: i64) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Outcome of a successful [`pack`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSummary {
    pub output: PathBuf,
    /// Value written on the count line.
    pub declared_count: i64,
    /// Instances actually written.
    pub instances: usize,
    pub excluded: Vec<String>,
    pub bytes_written: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Excluded,
    Instance {
        header: InstanceHeader,
        payload_lines: usize,
    },
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub name: String,
    pub label: String,
    pub status: EntryStatus,
}

impl EntryReport {
    pub fn is_invalid(&self) -> bool {
        matches!(self.status, EntryStatus::Invalid(_))
    }
}

/// Canonical root, output location and the output's name when it lives
/// inside the root.
struct Target {
    root: PathBuf,
    output: PathBuf,
    skip: Option<OsString>,
}

impl Target {
    fn resolve(opts: &PackOptions) -> Result<Self> {
        let root = fs::canonicalize(&opts.root).map_err(|source| Error::ReadDir {
            path: opts.root.clone(),
            source,
        })?;
        let dirname = root
            .file_name()
            .ok_or_else(|| Error::NoBaseName(root.clone()))?
            .to_os_string();

        let output = match &opts.output {
            Some(path) => path.clone(),
            None => {
                let mut file_name = dirname;
                if !opts.extension.is_empty() {
                    file_name.push(".");
                    file_name.push(&opts.extension);
                }
                root.join(file_name)
            }
        };

        let skip = if is_inside(&output, &root) {
            output.file_name().map(|n| n.to_os_string())
        } else {
            None
        };

        Ok(Self { root, output, skip })
    }
}

/// Whether `path`'s parent directory is `dir`. `dir` must be canonical.
fn is_inside(path: &Path, dir: &Path) -> bool {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).is_ok_and(|p| p == dir)
}

/// Write the aggregate file for `opts.root`.
///
/// Errors abort the run immediately. Whatever was already written stays in
/// the output file, including the label line of an instance that failed to
/// read or parse.
pub fn pack(opts: &PackOptions) -> Result<PackSummary> {
    let target = Target::resolve(opts)?;
    let snapshot = Snapshot::capture(&target.root, target.skip.as_deref())?;
    debug!(
        "Packing {} entries from {}",
        snapshot.len(),
        snapshot.root().display()
    );

    let file = File::create(&target.output).map_err(|source| Error::CreateOutput {
        path: target.output.clone(),
        source,
    })?;
    let write_err = |source| Error::WriteOutput {
        path: target.output.clone(),
        source,
    };

    let mut writer = BundleWriter::new(BufWriter::new(file), opts.placeholder);
    let declared_count = snapshot.declared_count();
    writer.write_count(declared_count).map_err(write_err)?;

    let mut instances = 0usize;
    let mut excluded = Vec::new();
    for name in snapshot.entries() {
        if opts.exclude.is_excluded(name) {
            debug!("Skipping excluded entry {}", name);
            excluded.push(name.clone());
            continue;
        }

        let path = snapshot.path_of(name);
        writer.write_label(label_for(name)).map_err(write_err)?;

        let bytes = fs::read(&path).map_err(|source| Error::ReadInstance {
            path: path.clone(),
            source,
        })?;
        let instance = parse_instance(&bytes).map_err(|source| Error::MalformedInstance {
            path: path.clone(),
            source,
        })?;
        debug!(
            "Instance {}: n={} C={} ({} payload bytes)",
            name,
            instance.header.n,
            instance.header.c,
            instance.payload.len()
        );

        writer.write_header(&instance.header).map_err(write_err)?;
        writer.write_payload(instance.payload).map_err(write_err)?;
        instances += 1;
    }

    let bytes_written = writer.bytes_written();
    writer.finish().map_err(write_err)?;

    if declared_count != instances as i64 {
        warn!(
            "Count line says {} but {} instances were written ({} entries excluded)",
            declared_count,
            instances,
            excluded.len()
        );
    }
    info!(
        "Wrote {} instances to {}",
        instances,
        target.output.display()
    );

    Ok(PackSummary {
        output: target.output,
        declared_count,
        instances,
        excluded,
        bytes_written,
    })
}

/// Classify every entry that [`pack`] would visit without writing anything.
pub fn inspect(opts: &PackOptions) -> Result<Vec<EntryReport>> {
    let target = Target::resolve(opts)?;
    let snapshot = Snapshot::capture(&target.root, target.skip.as_deref())?;

    let reports = snapshot
        .entries()
        .iter()
        .map(|name| EntryReport {
            name: name.clone(),
            label: label_for(name).to_string(),
            status: classify(&snapshot, &opts.exclude, name),
        })
        .collect();

    Ok(reports)
}

fn classify(snapshot: &Snapshot, exclude: &ExcludeRules, name: &str) -> EntryStatus {
    if exclude.is_excluded(name) {
        return EntryStatus::Excluded;
    }
    match fs::read(snapshot.path_of(name)) {
        Ok(bytes) => match parse_instance(&bytes) {
            Ok(instance) => EntryStatus::Instance {
                payload_lines: instance.payload_lines(),
                header: instance.header,
            },
            Err(e) => EntryStatus::Invalid(e.to_string()),
        },
        Err(e) => EntryStatus::Invalid(e.to_string()),
    }
}
