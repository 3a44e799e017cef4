use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use crate::errors::TrackerError;
use crate::services::SettingsService;

use super::helpers::{success_response, success_with_message};
use super::types::{SettingsRequest, SettingsResponse};

pub async fn get_settings(
    settings: web::Data<SettingsService>,
) -> Result<HttpResponse, TrackerError> {
    let current = settings.get().await?;
    Ok(success_response(SettingsResponse::from(&current)))
}

pub async fn save_settings(
    body: web::Json<SettingsRequest>,
    settings: web::Data<SettingsService>,
) -> Result<HttpResponse, TrackerError> {
    let saved = settings.save(body.into_inner().into()).await?;
    Ok(success_with_message(
        StatusCode::OK,
        "Settings saved successfully",
        SettingsResponse::from(&saved),
    ))
}
