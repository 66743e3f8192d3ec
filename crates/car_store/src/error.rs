use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("archive already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("archive not found: {}", .0.display())]
    CarMissing(PathBuf),

    #[error("nothing to pack, input not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("failed to start packer `{bin}`: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("packer exited with {status}: {stderr}")]
    PackFailed { status: String, stderr: String },

    #[error("io on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
