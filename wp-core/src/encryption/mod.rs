//! The two Web Push content codings.
//!
//! Both share the same skeleton: an ECDH agreement between a fresh server key pair and the
//! subscription's `p256dh` key, keyed by the subscription's auth secret, a key schedule through
//! HKDF and a single AES-128-GCM record. They differ in the derivation labels, the padding and
//! where salt and server key travel:
//!
//! * [`aes128gcm`] (RFC 8291): prepended to the body in an 86-byte header.
//! * [`aesgcm`] (draft): in the `Encryption` and `Crypto-Key` headers.

use crate::base64url::{self, serialize_bin_or_b64url};
use crate::consts::*;
use crate::crypto::{Aead, Kdf, KeyAgreement};
use crate::error::Error;
use crate::keys::{PublicKey, ServerKeyPair};
use crate::request::{Headers, CONTENT_ENCODING};
use crate::subscription::Subscription;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub mod aes128gcm;
pub mod aesgcm;

/// A Web Push content coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentCoding {
    /// RFC 8291 / RFC 8188.
    #[default]
    #[serde(rename = "aes128gcm")]
    Aes128Gcm,
    /// The legacy draft coding, still understood by older push services.
    #[serde(rename = "aesgcm")]
    AesGcm,
}

impl ContentCoding {
    /// The `Content-Encoding` token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes128Gcm => "aes128gcm",
            Self::AesGcm => "aesgcm",
        }
    }

    /// The largest plaintext that fits in a single record.
    pub fn max_payload_size(&self) -> usize {
        match self {
            Self::Aes128Gcm => aes128gcm::MAX_PAYLOAD_SIZE,
            Self::AesGcm => aesgcm::MAX_PAYLOAD_SIZE,
        }
    }

    /// Fail with [`Error::PayloadTooLarge`] if `len` bytes do not fit in a single record.
    pub fn check_payload_size(&self, len: usize) -> Result<(), Error> {
        let max = self.max_payload_size();
        if len > max {
            return Err(Error::PayloadTooLarge { size: len, max });
        }

        Ok(())
    }

    /// Encrypt `plaintext` for `subscription` under the given salt and server key pair.
    ///
    /// Salt and server key pair must never be reused for another message.
    pub fn encrypt<P>(
        &self,
        provider: &P,
        subscription: &Subscription,
        plaintext: &[u8],
        salt: [u8; SALT_SIZE],
        server_keys: &ServerKeyPair,
    ) -> Result<EncryptedPayload, Error>
    where
        P: KeyAgreement + Kdf + Aead + ?Sized,
    {
        self.check_payload_size(plaintext.len())?;

        let cipher_text = match self {
            Self::Aes128Gcm => {
                aes128gcm::encrypt(provider, subscription, plaintext, &salt, server_keys)?
            }
            Self::AesGcm => aesgcm::encrypt(provider, subscription, plaintext, &salt, server_keys)?,
        };

        Ok(EncryptedPayload {
            cipher_text,
            salt,
            public_server_key: server_keys.public_key.clone(),
        })
    }

    /// The headers describing an encrypted body.
    pub(crate) fn content_headers(&self, payload: &EncryptedPayload) -> Headers {
        let mut headers = Headers::new();
        if let Self::AesGcm = self {
            aesgcm::key_headers(payload, &mut headers);
        }
        headers.insert(CONTENT_ENCODING, self.as_str());

        headers
    }
}

impl core::fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ContentCoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aes128gcm" => Ok(Self::Aes128Gcm),
            "aesgcm" => Ok(Self::AesGcm),
            other => Err(Error::UnsupportedCoding(other.to_string())),
        }
    }
}

/// An encrypted push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPayload {
    /// The request body.
    #[serde(serialize_with = "serialize_bin_or_b64url")]
    pub cipher_text: Vec<u8>,
    /// The salt used for this message.
    #[serde(serialize_with = "serialize_bin_or_b64url")]
    pub salt: [u8; SALT_SIZE],
    /// The public half of the ephemeral server key pair.
    pub public_server_key: PublicKey,
}

impl EncryptedPayload {
    /// The base64url encoded salt.
    pub fn salt_base64url(&self) -> String {
        base64url::encode(&self.salt)
    }

    /// The base64url encoded server public key.
    pub fn public_server_key_base64url(&self) -> String {
        self.public_server_key.to_base64url()
    }
}

/// Content encryption key and nonce of one message.
pub(crate) struct KeySchedule {
    pub(crate) cek: Zeroizing<[u8; KEY_SIZE]>,
    pub(crate) nonce: Zeroizing<[u8; NONCE_SIZE]>,
}
