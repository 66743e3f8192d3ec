//! Local side of the archive: where the CAR lives, whether it exists, and
//! how it gets packed.
//!
//! Packing itself is delegated to an external tool through [`CarPacker`];
//! this crate never writes CAR bytes on its own.

pub mod error;
pub mod packer;

pub use error::{Result, StoreError};
pub use packer::{CarPacker, CommandPacker};

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

pub async fn car_exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Read the whole archive for upload. A missing file is reported as
/// [`StoreError::CarMissing`] rather than a bare I/O error.
pub async fn read_car(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::CarMissing(path.to_path_buf()))
        }
        Err(e) => Err(StoreError::Io { path: path.to_path_buf(), source: e }),
    }
}

/// Pack `input` into `output` unless an archive is already there.
///
/// The packer writes to a `.partial` sibling which is renamed onto `output`
/// only on success, so a crashed or interrupted pack never leaves a
/// truncated archive at `output`.
pub async fn generate(packer: &dyn CarPacker, input: &Path, output: &Path) -> Result<PathBuf> {
    if car_exists(output).await {
        return Err(StoreError::AlreadyExists(output.to_path_buf()));
    }
    if !car_exists(input).await {
        return Err(StoreError::InputMissing(input.to_path_buf()));
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::Io { path: parent.to_path_buf(), source: e })?;
    }

    let partial = partial_path(output);
    discard(&partial).await;
    info!(input = %input.display(), output = %output.display(), "packing archive");
    if let Err(e) = packer.pack(input, &partial).await {
        discard(&partial).await;
        return Err(e);
    }
    if let Err(e) = fs::rename(&partial, output).await {
        discard(&partial).await;
        return Err(StoreError::Io { path: output.to_path_buf(), source: e });
    }
    info!(output = %output.display(), "packed");
    Ok(output.to_path_buf())
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    output.with_file_name(name)
}

async fn discard(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => warn!(path = %path.display(), "removed partial archive"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove partial archive"),
    }
}
