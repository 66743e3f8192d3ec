//! CID normalization for the CAR API.
//!
//! The main application hashes player files itself and sends the resulting
//! multihashes as legacy base58 (CIDv0) strings. Downstream consumers store
//! those files as raw blocks, so every identifier leaves this crate as a
//! base32 CIDv1 carrying the `bafkr` prefix.
//!
//! ```text
//! { "code": 7, "base58": "Qm..." }  ──normalize──▶  { "code": 7, "cid": "bafkr..." }
//! ```

pub mod error;
pub mod normalize;

pub use error::{NormalizeError, Result};
pub use normalize::{normalize, normalize_cid, normalize_descriptor, FileDescriptor};

/// Input key holding the legacy identifier.
pub const LEGACY_KEY: &str = "base58";
/// Output key holding the normalized identifier.
pub const CID_KEY: &str = "cid";
/// Prefix every normalized identifier carries.
pub const NORMALIZED_PREFIX: &str = "bafkr";
