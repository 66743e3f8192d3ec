#![allow(dead_code)]

use async_trait::async_trait;
use car_config::Settings;
use car_gate::AppState;
use car_store::{CarPacker, StoreError};
use car_upload::{CarUploader, UploadError};
use reqwest::Client;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const ROOT_CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

/// Writes a fixed archive instead of running `ipfs-car`. A failing packer
/// still leaves a truncated file behind, as a crashed stream would.
pub struct FakePacker {
    pub fail: bool,
}

#[async_trait]
impl CarPacker for FakePacker {
    async fn pack(&self, _input: &Path, output: &Path) -> Result<(), StoreError> {
        if self.fail {
            tokio::fs::write(output, b"trunc").await.unwrap();
            return Err(StoreError::PackFailed {
                status: "exit status: 1".into(),
                stderr: "pack exploded".into(),
            });
        }
        tokio::fs::write(output, b"fake-car").await.unwrap();
        Ok(())
    }
}

/// Records uploads and accepts only the `good-token` token.
#[derive(Default)]
pub struct FakeUploader {
    pub seen: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl CarUploader for FakeUploader {
    async fn store_car(&self, token: &str, car: Vec<u8>) -> Result<String, UploadError> {
        self.seen.lock().unwrap().push((token.to_string(), car));
        if token != "good-token" {
            return Err(UploadError::Rejected { status: 401, message: "invalid token".into() });
        }
        Ok(ROOT_CID.to_string())
    }
}

pub struct Harness {
    pub base: String,
    pub http: Client,
    pub dir: TempDir,
    pub uploader: Arc<FakeUploader>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Harness {
    pub fn car_path(&self) -> std::path::PathBuf {
        self.dir.path().join("data/players.car")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

pub async fn setup_with(fail_pack: bool) -> Harness {
    setup_configured(fail_pack, |_| {}).await
}

pub async fn setup_configured(fail_pack: bool, configure: impl FnOnce(&mut Settings)) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let players = dir.path().join("data/players");
    std::fs::create_dir_all(&players).unwrap();
    std::fs::write(players.join("1.png"), b"png").unwrap();

    let mut settings = Settings {
        car_path: dir.path().join("data/players.car"),
        players_path: players,
        ..Settings::default()
    };
    configure(&mut settings);
    let uploader = Arc::new(FakeUploader::default());
    let state = AppState {
        settings: Arc::new(settings),
        packer: Arc::new(FakePacker { fail: fail_pack }),
        uploader: uploader.clone(),
    };
    let (addr, handle) = car_gate::test::spawn(state).await;
    Harness {
        base: format!("http://{addr}"),
        http: Client::new(),
        dir,
        uploader,
        _handle: handle,
    }
}

pub async fn setup() -> Harness {
    setup_with(false).await
}
