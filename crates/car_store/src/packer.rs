//! Packer seam. The default implementation shells out to the `ipfs-car`
//! CLI, which owns the CAR format and UnixFS layout.

use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

#[async_trait]
pub trait CarPacker: Send + Sync {
    /// Pack the file or directory at `input` into a CAR at `output`.
    async fn pack(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Runs `<bin> pack <input> --output <output>`.
#[derive(Debug, Clone)]
pub struct CommandPacker {
    pub bin: String,
}

impl CommandPacker {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn args<'a>(input: &'a Path, output: &'a Path) -> [&'a std::ffi::OsStr; 4] {
        [
            "pack".as_ref(),
            input.as_os_str(),
            "--output".as_ref(),
            output.as_os_str(),
        ]
    }
}

#[async_trait]
impl CarPacker for CommandPacker {
    async fn pack(&self, input: &Path, output: &Path) -> Result<()> {
        debug!(bin = %self.bin, "spawning packer");
        let out = Command::new(&self.bin)
            .args(Self::args(input, output))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| StoreError::Spawn { bin: self.bin.clone(), source: e })?;

        if !out.status.success() {
            return Err(StoreError::PackFailed {
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
