/**
 * Message Codec
 *
 * Encrypts and decrypts chat message bodies with AES-256 in CBC mode and
 * PKCS#7 padding. Cipher text and IV are stored hex-encoded, next to each
 * other, on every message row.
 *
 * # Key
 *
 * One 32-byte key is shared by the whole process. It comes from the
 * `ENCRYPTION_KEY` setting, given either as 32 raw characters or as 64 hex
 * digits. A missing or malformed key is a startup error.
 *
 * # IV
 *
 * Every call to [`MessageCodec::encrypt`] draws a fresh random 16-byte IV,
 * so encrypting the same text twice yields two different cipher texts. The
 * IV is required to decrypt; a message whose IV is lost is unrecoverable.
 *
 * # Integrity
 *
 * CBC carries no authentication tag. Truncated input or bad padding fails
 * with [`CodecError::Decryption`], but a cipher text altered in place can
 * decrypt to garbage instead of failing.
 */

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use thiserror::Error;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// IV length in bytes (one AES block)
pub const IV_LEN: usize = 16;

/// Codec errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The configured key is not 32 bytes (raw) or 64 hex digits
    #[error("Encryption key must be 32 characters or 64 hex digits, got {len} characters")]
    InvalidKey { len: usize },

    /// Cipher text could not be turned back into the original message
    #[error("Decryption failed: {reason}")]
    Decryption { reason: String },
}

impl CodecError {
    fn decryption(reason: impl Into<String>) -> Self {
        Self::Decryption {
            reason: reason.into(),
        }
    }
}

/// Hex-encoded output of one encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage {
    pub cipher_text: String,
    pub iv: String,
}

/// Symmetric codec holding the process-wide key
#[derive(Clone)]
pub struct MessageCodec {
    key: [u8; KEY_LEN],
}

impl std::fmt::Debug for MessageCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCodec").finish_non_exhaustive()
    }
}

impl MessageCodec {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Build a codec from the configured key string.
    ///
    /// 64 hex digits are decoded; anything else must be exactly 32 bytes
    /// and is used as-is.
    pub fn from_config(raw: &str) -> Result<Self, CodecError> {
        let raw = raw.trim();
        let mut key = [0u8; KEY_LEN];

        if raw.len() == KEY_LEN * 2 && hex::decode_to_slice(raw, &mut key).is_ok() {
            return Ok(Self::new(key));
        }
        if raw.len() != KEY_LEN {
            return Err(CodecError::InvalidKey { len: raw.len() });
        }
        key.copy_from_slice(raw.as_bytes());
        Ok(Self::new(key))
    }

    /// Encrypt `plain_text` under a fresh random IV
    pub fn encrypt(&self, plain_text: &str) -> EncryptedMessage {
        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);

        let cipher_text = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plain_text.as_bytes());

        EncryptedMessage {
            cipher_text: hex::encode(cipher_text),
            iv: hex::encode(iv),
        }
    }

    /// Decrypt a hex cipher text with its hex IV
    pub fn decrypt(&self, cipher_text: &str, iv: &str) -> Result<String, CodecError> {
        let mut iv_bytes = [0u8; IV_LEN];
        hex::decode_to_slice(iv, &mut iv_bytes)
            .map_err(|e| CodecError::decryption(format!("invalid IV: {}", e)))?;
        let cipher_bytes = hex::decode(cipher_text)
            .map_err(|e| CodecError::decryption(format!("invalid cipher text: {}", e)))?;

        let plain = Aes256CbcDec::new(&self.key.into(), &iv_bytes.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&cipher_bytes)
            .map_err(|_| CodecError::decryption("bad padding or truncated cipher text"))?;

        String::from_utf8(plain).map_err(|_| CodecError::decryption("plaintext is not valid UTF-8"))
    }
}
