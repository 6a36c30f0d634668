/**
 * KYC Handlers
 *
 * POST /send-otp issues a six-digit code for a registered email and phone
 * pair and mails it. POST /verify-otp checks the code and marks the user as
 * KYC verified.
 */

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::users::{get_user_by_email_and_phone, mark_kyc_verified};
use crate::backend::error::BackendError;
use crate::backend::kyc::mailer::{OtpEmail, OtpMailer};
use crate::backend::kyc::otp_store::{OtpCheck, OtpStore};

/// Length of a phone number accepted by the KYC flow
pub const PHONE_LEN: usize = 10;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SendOtpRequest {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct VerifyOtpResponse {
    pub verified: bool,
    pub message: String,
}

pub async fn send_otp(
    State(pool): State<Option<PgPool>>,
    State(otp_store): State<OtpStore>,
    State(mailer): State<Arc<dyn OtpMailer>>,
    Json(request): Json<SendOtpRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let email = request.email.trim();
    let phone = request.phone.trim();
    if email.is_empty() || phone.chars().count() != PHONE_LEN {
        tracing::warn!("Rejected OTP request for {:?}", email);
        return Err(BackendError::validation("Invalid email or phone"));
    }

    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;
    if get_user_by_email_and_phone(&pool, email, phone).await?.is_none() {
        tracing::warn!("OTP requested for unknown email/phone pair: {}", email);
        return Err(BackendError::validation("Email and phone do not match any user"));
    }

    let code = otp_store.issue(email).await;
    let valid_minutes = otp_store.ttl().as_secs() / 60;
    let mail = OtpEmail::new(&code, valid_minutes);

    if let Err(e) = mailer.send(email, &mail).await {
        otp_store.discard(email).await;
        return Err(e.into());
    }

    tracing::info!("OTP issued for {}", email);
    Ok(Json(MessageResponse::new("OTP sent")))
}

pub async fn verify_otp(
    State(pool): State<Option<PgPool>>,
    State(otp_store): State<OtpStore>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, BackendError> {
    let email = request.email.trim();
    let otp = request.otp.trim();
    if email.is_empty() || otp.is_empty() {
        return Err(BackendError::validation("Email and OTP are required"));
    }

    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;

    // consumed only once the user row is updated
    match otp_store.check(email, otp).await {
        OtpCheck::Verified => {}
        outcome => {
            tracing::warn!("OTP verification failed for {}: {:?}", email, outcome);
            return Err(BackendError::validation("Invalid or expired OTP"));
        }
    }

    if mark_kyc_verified(&pool, email).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }
    otp_store.consume(email, otp).await;

    tracing::info!("KYC verified for {}", email);
    Ok(Json(VerifyOtpResponse {
        verified: true,
        message: "KYC Verified Successfully".to_string(),
    }))
}
