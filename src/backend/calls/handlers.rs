/**
 * Call Log Handlers
 *
 * POST /calls stores a call, GET /calls/{phoneNumber} returns the history of
 * one number sorted newest first.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::backend::calls::db::{calls_for_number, insert_call, Call, CallType};
use crate::backend::error::BackendError;

const REQUIRED_FIELDS: &str = "Phone number and call type are required";

/// Body of `POST /calls`
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveCallRequest {
    pub phone_number: String,
    pub call_type: String,
}

impl SaveCallRequest {
    fn validate(&self) -> Result<(&str, CallType), BackendError> {
        let phone_number = self.phone_number.trim();
        let call_type = self.call_type.trim();
        if phone_number.is_empty() || call_type.is_empty() {
            return Err(BackendError::validation(REQUIRED_FIELDS));
        }
        let call_type = call_type
            .parse::<CallType>()
            .map_err(|_| BackendError::validation("Call type must be incoming or outgoing"))?;
        Ok((phone_number, call_type))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveCallResponse {
    pub message: String,
    pub call: Call,
}

pub async fn save_call(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<SaveCallRequest>,
) -> Result<(StatusCode, Json<SaveCallResponse>), BackendError> {
    let (phone_number, call_type) = request.validate().map_err(|e| {
        tracing::warn!("Rejected call record: {}", e);
        e
    })?;
    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;

    let call = insert_call(&pool, phone_number, call_type).await?;
    tracing::info!("Saved {} call for {}", call.call_type, call.phone_number);

    Ok((
        StatusCode::CREATED,
        Json(SaveCallResponse {
            message: "Call saved successfully".to_string(),
            call,
        }),
    ))
}

pub async fn call_history(
    State(pool): State<Option<PgPool>>,
    Path(phone_number): Path<String>,
) -> Result<Json<Vec<Call>>, BackendError> {
    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;
    let calls = calls_for_number(&pool, &phone_number).await?;
    Ok(Json(calls))
}
