use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

use crate::pack::instance::InstanceError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read instance file {}", path.display())]
    ReadInstance {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output file {}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory {} has no base name to derive an output name from", .0.display())]
    NoBaseName(PathBuf),

    #[error("File name is not valid UTF-8: {0:?}")]
    NonUtf8Name(OsString),

    #[error("Malformed instance file {}", path.display())]
    MalformedInstance {
        path: PathBuf,
        #[source]
        source: InstanceError,
    },

    #[error("Invalid exclude pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
