//! Process settings for the CAR API, read once from the environment.

use lazy_static::lazy_static;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_IP: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CAR_PATH: &str = "data/players.car";
pub const DEFAULT_PLAYERS_PATH: &str = "data/players";
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://api.nft.storage";
pub const DEFAULT_PACK_BIN: &str = "ipfs-car";
/// 50 MiB, large enough for a full player batch in one `/get-cid` call.
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;
/// Packing and uploading a full archive can take minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

lazy_static! {
    pub static ref SETTINGS: Settings = Settings::from_env();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_ip: String,
    pub port: u16,
    /// Where the packed archive is written and read back for upload.
    pub car_path: PathBuf,
    /// Directory packed into the archive.
    pub players_path: PathBuf,
    pub storage_endpoint: String,
    pub pack_bin: String,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let string = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            api_ip: string("API_IP", DEFAULT_API_IP),
            port: parsed(&get, "CAR_API_PORT", DEFAULT_PORT),
            car_path: PathBuf::from(string("CAR_PATH", DEFAULT_CAR_PATH)),
            players_path: PathBuf::from(string("PLAYERS_PATH", DEFAULT_PLAYERS_PATH)),
            storage_endpoint: string("NFT_STORAGE_ENDPOINT", DEFAULT_STORAGE_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
            pack_bin: string("CAR_PACK_BIN", DEFAULT_PACK_BIN),
            max_body_bytes: parsed(&get, "CAR_API_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
            request_timeout: Duration::from_secs(parsed(
                &get,
                "CAR_API_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_ip, self.port)
    }
}

fn parsed<T, G>(get: &G, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, fallback = %default, "invalid setting, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with(vars: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.bind_addr(), "localhost:8080");
        assert_eq!(s.car_path, PathBuf::from("data/players.car"));
        assert_eq!(s.players_path, PathBuf::from("data/players"));
        assert_eq!(s.storage_endpoint, "https://api.nft.storage");
        assert_eq!(s.pack_bin, "ipfs-car");
        assert_eq!(s.max_body_bytes, 50 * 1024 * 1024);
        assert_eq!(s.request_timeout, Duration::from_secs(300));
    }

    #[test]
    fn overrides() {
        let s = with(&[
            ("API_IP", "0.0.0.0"),
            ("CAR_API_PORT", "9000"),
            ("CAR_PATH", "/tmp/out.car"),
            ("NFT_STORAGE_ENDPOINT", "http://127.0.0.1:5000/"),
            ("CAR_API_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(s.bind_addr(), "0.0.0.0:9000");
        assert_eq!(s.car_path, PathBuf::from("/tmp/out.car"));
        assert_eq!(s.storage_endpoint, "http://127.0.0.1:5000");
        assert_eq!(s.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let s = with(&[("CAR_API_PORT", "eighty"), ("CAR_API_MAX_BODY_BYTES", "-1")]);
        assert_eq!(s.port, DEFAULT_PORT);
        assert_eq!(s.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn blank_values_are_unset() {
        let s = with(&[("API_IP", "  "), ("CAR_PACK_BIN", "")]);
        assert_eq!(s.api_ip, DEFAULT_API_IP);
        assert_eq!(s.pack_bin, DEFAULT_PACK_BIN);
    }
}
