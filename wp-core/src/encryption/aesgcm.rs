//! The legacy "aesgcm" content coding (draft-ietf-webpush-encryption-04).
//!
//! The key schedule binds both public keys through a context string instead of the info prefix
//! of RFC 8291, and the record starts with a two-byte padding length (always zero):
//!
//! ```text
//! context = "P-256" || 0x00 || 0x0041 || ua_public || 0x0041 || as_public
//! prk     = HKDF(ecdh_secret, auth_secret, "Content-Encoding: auth" || 0x00, 32)
//! cek     = HKDF(prk, salt, "Content-Encoding: aesgcm" || 0x00 || context, 16)
//! nonce   = HKDF(prk, salt, "Content-Encoding: nonce" || 0x00 || context, 12)
//!
//! body    = AES-GCM(0x0000 || plaintext)
//! ```
//!
//! Salt and server public key are sent in the `Encryption` and `Crypto-Key` headers.

use super::{EncryptedPayload, KeySchedule};
use crate::consts::*;
use crate::crypto::{derive_array, Aead, Kdf, KeyAgreement};
use crate::error::Error;
use crate::keys::ServerKeyPair;
use crate::request::{Headers, CRYPTO_KEY, CRYPTO_KEY_SEPARATOR, ENCRYPTION};
use crate::subscription::Subscription;
use zeroize::Zeroizing;

/// Curve label that starts the context.
pub const CURVE_LABEL: &[u8] = b"P-256\0";

/// Info used to derive the pseudo-random key.
pub const AUTH_INFO: &[u8] = b"Content-Encoding: auth\0";

/// Label of the info used to derive the content encryption key.
pub const CEK_LABEL: &[u8] = b"Content-Encoding: aesgcm\0";

/// Label of the info used to derive the nonce.
pub const NONCE_LABEL: &[u8] = b"Content-Encoding: nonce\0";

/// The largest plaintext that fits a single record with its padding length and tag.
pub const MAX_PAYLOAD_SIZE: usize = RECORD_SIZE as usize - TAG_SIZE - LEGACY_PADDING_SIZE;

fn context(ua_public: &[u8; PUBLIC_KEY_SIZE], as_public: &[u8; PUBLIC_KEY_SIZE]) -> Vec<u8> {
    let key_len = (PUBLIC_KEY_SIZE as u16).to_be_bytes();

    [CURVE_LABEL, &key_len, ua_public, &key_len, as_public].concat()
}

pub(crate) fn key_schedule<P>(
    provider: &P,
    subscription: &Subscription,
    salt: &[u8; SALT_SIZE],
    server_keys: &ServerKeyPair,
) -> Result<KeySchedule, Error>
where
    P: KeyAgreement + Kdf + ?Sized,
{
    let keys = &subscription.keys;
    let secret = provider.shared_secret(&server_keys.private_key, &keys.p256dh)?;

    let prk: Zeroizing<[u8; PRK_SIZE]> =
        derive_array(provider, secret.as_slice(), keys.auth.as_ref(), AUTH_INFO)?;

    let context = context(
        &keys.p256dh.to_uncompressed(),
        &server_keys.public_key.to_uncompressed(),
    );
    let cek_info = [CEK_LABEL, &context].concat();
    let nonce_info = [NONCE_LABEL, &context].concat();

    Ok(KeySchedule {
        cek: derive_array(provider, prk.as_slice(), salt, &cek_info)?,
        nonce: derive_array(provider, prk.as_slice(), salt, &nonce_info)?,
    })
}

pub(crate) fn encrypt<P>(
    provider: &P,
    subscription: &Subscription,
    plaintext: &[u8],
    salt: &[u8; SALT_SIZE],
    server_keys: &ServerKeyPair,
) -> Result<Vec<u8>, Error>
where
    P: KeyAgreement + Kdf + Aead + ?Sized,
{
    let KeySchedule { cek, nonce } = key_schedule(provider, subscription, salt, server_keys)?;

    let mut record = Zeroizing::new(Vec::with_capacity(LEGACY_PADDING_SIZE + plaintext.len()));
    record.extend_from_slice(&[0u8; LEGACY_PADDING_SIZE]);
    record.extend_from_slice(plaintext);

    provider.seal(&cek, &nonce, &record)
}

/// Add `Encryption: salt=...` and `Crypto-Key: dh=...`.
///
/// An existing `Crypto-Key` value is extended, never replaced.
pub(crate) fn key_headers(payload: &EncryptedPayload, headers: &mut Headers) {
    headers.insert(ENCRYPTION, format!("salt={}", payload.salt_base64url()));
    headers.append(
        CRYPTO_KEY,
        &format!("dh={}", payload.public_server_key_base64url()),
        CRYPTO_KEY_SEPARATOR,
    );
}
