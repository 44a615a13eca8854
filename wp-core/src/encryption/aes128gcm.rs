//! The "aes128gcm" content coding of RFC 8291, on top of the record format of RFC 8188.
//!
//! ```text
//! key_info = "WebPush: info" || 0x00 || ua_public || as_public
//! ikm      = HKDF(ecdh_secret, auth_secret, key_info, 32)
//! cek      = HKDF(ikm, salt, "Content-Encoding: aes128gcm" || 0x00, 16)
//! nonce    = HKDF(ikm, salt, "Content-Encoding: nonce" || 0x00, 12)
//!
//! body     = salt (16) || rs (4) || idlen (1) || as_public (65) || AES-GCM(plaintext || 0x02)
//! ```

use super::KeySchedule;
use crate::consts::*;
use crate::crypto::{derive_array, Aead, Kdf, KeyAgreement};
use crate::error::Error;
use crate::keys::{PublicKey, ServerKeyPair};
use crate::subscription::Subscription;
use zeroize::Zeroizing;

/// Prefix of the info used to derive the input keying material.
pub const KEY_INFO_PREFIX: &[u8] = b"WebPush: info\0";

/// Info used to derive the content encryption key.
pub const CEK_INFO: &[u8] = b"Content-Encoding: aes128gcm\0";

/// Info used to derive the nonce.
pub const NONCE_INFO: &[u8] = b"Content-Encoding: nonce\0";

/// The largest plaintext that fits a single record with its delimiter and tag.
pub const MAX_PAYLOAD_SIZE: usize = RECORD_SIZE as usize - TAG_SIZE - 1;

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

    let key_info = [
        KEY_INFO_PREFIX,
        &keys.p256dh.to_uncompressed(),
        &server_keys.public_key.to_uncompressed(),
    ]
    .concat();

    let ikm: Zeroizing<[u8; PRK_SIZE]> =
        derive_array(provider, secret.as_slice(), keys.auth.as_ref(), &key_info)?;

    Ok(KeySchedule {
        cek: derive_array(provider, ikm.as_slice(), salt, CEK_INFO)?,
        nonce: derive_array(provider, ikm.as_slice(), salt, NONCE_INFO)?,
    })
}

/// Write the record header: salt, record size, key identifier length and the server public key.
pub fn header(salt: &[u8; SALT_SIZE], server_public_key: &PublicKey) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let (salt_buf, rest) = header.split_at_mut(SALT_SIZE);
    let (rs_buf, rest) = rest.split_at_mut(RECORD_SIZE_SIZE);
    let (idlen_buf, key_buf) = rest.split_at_mut(KEY_ID_LEN_SIZE);

    salt_buf.copy_from_slice(salt);
    rs_buf.copy_from_slice(&RECORD_SIZE.to_be_bytes());
    idlen_buf[0] = PUBLIC_KEY_SIZE as u8;
    key_buf.copy_from_slice(&server_public_key.to_uncompressed());

    header
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

    let mut record = Zeroizing::new(Vec::with_capacity(plaintext.len() + 1));
    record.extend_from_slice(plaintext);
    record.push(LAST_RECORD_DELIMITER);

    let ct = provider.seal(&cek, &nonce, &record)?;

    let mut body = Vec::with_capacity(HEADER_SIZE + ct.len());
    body.extend_from_slice(&header(salt, &server_keys.public_key));
    body.extend_from_slice(&ct);

    Ok(body)
}

#[cfg(all(test, feature = "rust"))]
mod tests {
    use super::*;
    use crate::base64url;
    use crate::crypto::rust::RustCrypto;
    use crate::test::TestSetup;

    #[test]
    fn test_rfc8291_key_schedule() {
        let setup = TestSetup::default();
        let schedule = key_schedule(
            &RustCrypto,
            &setup.subscription,
            &setup.salt,
            &setup.server_keys,
        )
        .unwrap();

        assert_eq!(base64url::encode(schedule.cek.as_slice()), "oIhVW04MRdy2XN9CiKLxTg");
        assert_eq!(base64url::encode(schedule.nonce.as_slice()), "4h_95klXJ5E_qnoN");
    }

    #[test]
    fn test_rfc8291_header() {
        let setup = TestSetup::default();
        let header = header(&setup.salt, &setup.server_keys.public_key);

        assert_eq!(&header[16..20], &[0x00, 0x00, 0x10, 0x00]);
        assert_eq!(header[20], 65);
        assert_eq!(
            base64url::encode(&header),
            "DGv6ra1nlYgDCS1FRnbzlwAAEABBBP4z9KsN6nGRTbVYI_c7VJSPQTBtkgcy27mlmlMoZIIgDll6e3vCYLocInmYWAmS6TlzAC8wEqKK6PBru3jl7A8"
        );
    }

    #[test]
    fn test_rfc8291_body() {
        let setup = TestSetup::default();
        let body = encrypt(
            &RustCrypto,
            &setup.subscription,
            TestSetup::PLAINTEXT,
            &setup.salt,
            &setup.server_keys,
        )
        .unwrap();

        assert_eq!(body.len(), HEADER_SIZE + TestSetup::PLAINTEXT.len() + 1 + TAG_SIZE);
        assert_eq!(base64url::encode(&body), TestSetup::RFC8291_BODY);
    }

    #[test]
    fn test_short_message() {
        let setup = TestSetup::default();
        let body = encrypt(
            &RustCrypto,
            &setup.subscription,
            b"hi",
            &setup.salt,
            &setup.server_keys,
        )
        .unwrap();

        assert_eq!(base64url::encode(&body[HEADER_SIZE..]), "zZa5VtRhRc28aPhUp7KUiATMvQ");
    }
}
