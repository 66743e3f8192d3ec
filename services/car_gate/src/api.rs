use crate::error::{ApiReply, AppError};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct UploadReq {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetCidReq {
    pub files: Vec<Value>,
}

pub async fn is_alive() -> ApiReply {
    ApiReply { is_active: Some(true), ..ApiReply::ok() }
}

pub async fn generate_car(State(state): State<AppState>) -> Result<ApiReply, AppError> {
    info!("generating car");
    let settings = &state.settings;
    let output = car_store::generate(
        state.packer.as_ref(),
        &settings.players_path,
        &settings.car_path,
    )
    .await?;
    Ok(ApiReply {
        output: Some(output.display().to_string()),
        ..ApiReply::ok()
    })
}

pub async fn upload_car(
    State(state): State<AppState>,
    body: Result<Json<UploadReq>, JsonRejection>,
) -> Result<ApiReply, AppError> {
    let Json(req) = body.map_err(AppError::from)?;
    let token = req
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request("missing token"))?;

    let car_path = &state.settings.car_path;
    if !car_store::car_exists(car_path).await {
        return Err(car_store::StoreError::CarMissing(car_path.clone()).into());
    }
    let car = car_store::read_car(car_path).await?;
    info!(path = %car_path.display(), bytes = car.len(), "uploading car");
    let cid = state.uploader.store_car(&token, car).await?;
    info!(%cid, "uploaded car");
    Ok(ApiReply { cid: Some(cid), ..ApiReply::ok() })
}

pub async fn get_cid(body: Result<Json<GetCidReq>, JsonRejection>) -> Result<ApiReply, AppError> {
    let Json(req) = body.map_err(AppError::from)?;
    info!(count = req.files.len(), "converting to v1");
    let files = car_cid::normalize(req.files)?;
    info!(count = files.len(), "converted to v1");
    Ok(ApiReply { files: Some(files), ..ApiReply::ok() })
}

pub async fn not_found() -> AppError {
    AppError::not_found("route not found")
}
