use crate::error::{Result, UploadError};
use crate::CarUploader;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, info};

pub const CAR_CONTENT_TYPE: &str = "application/car";

#[derive(Debug, Deserialize)]
struct UploadReply {
    #[serde(default)]
    ok: bool,
    value: Option<UploadValue>,
    error: Option<UploadFailure>,
}

#[derive(Debug, Deserialize)]
struct UploadValue {
    cid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadFailure {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpUploader {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpUploader {
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: &str, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.endpoint)
    }
}

#[async_trait]
impl CarUploader for HttpUploader {
    async fn store_car(&self, token: &str, car: Vec<u8>) -> Result<String> {
        let url = self.upload_url();
        info!(%url, bytes = car.len(), "uploading archive");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, CAR_CONTENT_TYPE)
            .body(car)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), "storage replied");

        let reply: Option<UploadReply> = serde_json::from_str(&body).ok();
        match reply {
            Some(UploadReply { ok: true, value: Some(UploadValue { cid: Some(cid) }), .. })
                if status.is_success() =>
            {
                info!(%cid, "uploaded");
                Ok(cid)
            }
            Some(UploadReply { ok: true, .. }) if status.is_success() => Err(
                UploadError::MalformedResponse("missing value.cid".into()),
            ),
            Some(UploadReply { error: Some(UploadFailure { message: Some(message) }), .. }) => {
                Err(UploadError::Rejected { status: status.as_u16(), message })
            }
            _ if !status.is_success() => Err(UploadError::Rejected {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            }),
            _ => Err(UploadError::MalformedResponse(body)),
        }
    }
}
