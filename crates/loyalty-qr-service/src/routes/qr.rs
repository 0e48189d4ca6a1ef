use actix_web::{post, web, HttpRequest, HttpResponse};
use loyalty_qr::Verdict;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::state::AppState;

const MAX_CODE_LEN: usize = 255;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub code: String,
    #[serde(alias = "barId")]
    pub bar_id: u64,
    pub amount: String,
}

impl GenerateRequest {
    fn check_shape(&self) -> Result<(), ServiceError> {
        check_code_length(&self.code)?;
        if self.bar_id == 0 {
            return Err(ServiceError::InvalidRequest(
                "bar_id must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub qr_image_data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
}

fn check_code_length(code: &str) -> Result<(), ServiceError> {
    let len = code.chars().count();
    if len == 0 || len > MAX_CODE_LEN {
        return Err(ServiceError::InvalidRequest(format!(
            "code must be between 1 and {MAX_CODE_LEN} characters"
        )));
    }
    Ok(())
}

/// JSON extractor config: 64 KiB limit, parse failures become 422 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(65_536)
        .error_handler(|err, _req: &HttpRequest| {
            ServiceError::InvalidRequest(err.to_string()).into()
        })
}

#[post("/api/qr/generate")]
pub async fn generate(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let req = body.into_inner();
    req.check_shape()?;

    tracing::info!(code = %req.code, bar_id = req.bar_id, "received QR generation request");

    // Rendering is CPU-bound; keep it off the async workers.
    let worker_state = state.clone();
    let image = web::block(move || {
        worker_state
            .qr
            .generate(&req.code, req.bar_id, &req.amount)
    })
    .await
    .map_err(|e| ServiceError::Internal(format!("generation task failed: {e}")))??;

    Ok(HttpResponse::Ok().json(GenerateResponse {
        success: true,
        message: "QR code generated successfully".to_string(),
        qr_image_data: Some(image.into_string()),
    }))
}

#[post("/api/qr/validate")]
pub async fn validate(
    state: web::Data<AppState>,
    body: web::Json<ValidateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let req = body.into_inner();
    check_code_length(&req.code)?;

    tracing::info!(code = %req.code, "received QR validation request");

    let verdict: Verdict = state.qr.validate(&req.code).await;
    Ok(HttpResponse::Ok().json(verdict))
}
