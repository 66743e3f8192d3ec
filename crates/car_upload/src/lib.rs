//! Upload client for packed CAR archives.
//!
//! The remote speaks the NFT.Storage upload API: a single authenticated
//! `POST /upload` with the archive as body, answered by
//! `{ "ok": true, "value": { "cid": ... } }`.

pub mod error;
pub mod http;

pub use error::{Result, UploadError};
pub use http::HttpUploader;

use async_trait::async_trait;

#[async_trait]
pub trait CarUploader: Send + Sync {
    /// Store a CAR archive under `token` and return the root CID reported
    /// by the remote. The token is forwarded verbatim.
    async fn store_car(&self, token: &str, car: Vec<u8>) -> Result<String>;
}
