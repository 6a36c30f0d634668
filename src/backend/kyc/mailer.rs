/**
 * Verification Mail Delivery
 *
 * `OtpMailer` is the outbound mail capability used by the KYC flow.
 *
 * - `SmtpMailer` sends through an SMTP relay with lettre
 * - `LogMailer` only logs, used when SMTP is not configured
 */

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build mail: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Subject and bodies of the verification mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OtpEmail {
    pub fn new(code: &str, valid_minutes: u64) -> Self {
        Self {
            subject: "Your OTP for KYC Verification".to_string(),
            text: format!("Your OTP is {code}. It is valid for {valid_minutes} minutes."),
            html: format!("<p>Your OTP is <b>{code}</b>. It is valid for {valid_minutes} minutes.</p>"),
        }
    }
}

#[async_trait]
pub trait OtpMailer: Send + Sync {
    async fn send(&self, to: &str, email: &OtpEmail) -> Result<(), MailError>;
}

/// SMTP settings read from the environment
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let from = settings.from.parse::<Mailbox>()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl OtpMailer for SmtpMailer {
    async fn send(&self, to: &str, email: &OtpEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))?;

        self.transport.send(message).await?;
        tracing::info!("Sent verification mail to {}", to);
        Ok(())
    }
}

/// Writes the mail to the log instead of sending it
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl OtpMailer for LogMailer {
    async fn send(&self, to: &str, email: &OtpEmail) -> Result<(), MailError> {
        tracing::info!("SMTP not configured, verification mail to {} not sent", to);
        tracing::debug!("Mail body for {}: {}", to, email.text);
        Ok(())
    }
}
