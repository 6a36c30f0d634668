//! KYC Module
//!
//! Identity verification by one-time code sent to the user's email.
//!
//! - **`otp_store`** - codes with an explicit time-to-live
//! - **`mailer`** - outbound mail (SMTP via lettre, or log only)
//! - **`handlers`** - POST /send-otp, POST /verify-otp

pub mod otp_store;

pub mod mailer;

pub mod handlers;

pub use handlers::{send_otp, verify_otp};
pub use mailer::{LogMailer, MailError, OtpEmail, OtpMailer, SmtpMailer, SmtpSettings};
pub use otp_store::{OtpCheck, OtpStore};
