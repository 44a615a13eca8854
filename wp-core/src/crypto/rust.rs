//! This module implements the cryptographic capabilities using the primitives provided by [`Rust
//! Crypto`](https://github.com/RustCrypto): [`p256`] for ECDH and ECDSA, [`aes_gcm`] for
//! content encryption and the single-block [`Hkdf`] of this crate.

use super::*;
use crate::hkdf::Hkdf;

use aes_gcm::aead::{Aead as _, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};
use p256::ecdsa::signature::Signer as _;
use p256::ecdsa::{Signature, SigningKey};
use rand::rngs::OsRng;
use rand::RngCore;

/// The Rust Crypto provider.
///
/// Randomness is drawn from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCrypto;

impl From<aes_gcm::Error> for Error {
    fn from(_: aes_gcm::Error) -> Self {
        Self::Symmetric
    }
}

impl From<p256::ecdsa::Error> for Error {
    fn from(_: p256::ecdsa::Error) -> Self {
        Self::Signature
    }
}

impl Random for RustCrypto {
    fn fill(&self, buf: &mut [u8]) -> Result<(), Error> {
        OsRng.try_fill_bytes(buf).map_err(|_| Error::Random)
    }
}

impl KeyAgreement for RustCrypto {
    fn generate_key_pair(&self) -> Result<EcKeyPair, Error> {
        Ok(EcKeyPair::generate(&mut OsRng))
    }

    fn shared_secret(
        &self,
        private_key: &SecretKey,
        peer: &PublicKey,
    ) -> Result<Zeroizing<[u8; SHARED_SECRET_SIZE]>, Error> {
        let shared =
            p256::ecdh::diffie_hellman(private_key.0.to_nonzero_scalar(), peer.0.as_affine());

        let mut out = Zeroizing::new([0u8; SHARED_SECRET_SIZE]);
        out.copy_from_slice(shared.raw_secret_bytes());

        Ok(out)
    }
}

impl Kdf for RustCrypto {
    fn derive(
        &self,
        ikm: &[u8],
        salt: &[u8],
        info: &[u8],
        len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        Hkdf::new(ikm, salt).generate(info, len)
    }
}

impl Aead for RustCrypto {
    fn seal(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let aead = Aes128Gcm::new_from_slice(key).map_err(|_| Error::Symmetric)?;

        Ok(aead.encrypt(Nonce::from_slice(nonce), plaintext)?)
    }
}

impl Signer for RustCrypto {
    fn sign(&self, private_key: &SecretKey, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE], Error> {
        let signing_key = SigningKey::from(&private_key.0);
        let signature: Signature = signing_key.try_sign(message)?;

        let mut out = [0u8; SIGNATURE_SIZE];
        out.copy_from_slice(&signature.to_bytes());

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base64url;
    use crate::test::TestSetup;
    use p256::ecdsa::signature::Verifier;
    use p256::ecdsa::VerifyingKey;

    #[test]
    fn test_rfc8291_shared_secret() {
        let setup = TestSetup::default();
        let secret = RustCrypto
            .shared_secret(
                &setup.server_keys.private_key,
                &setup.subscription.keys.p256dh,
            )
            .unwrap();

        assert_eq!(
            base64url::encode(secret.as_slice()),
            "kyrL1jIIOHEzg3sM2ZWRHDRB62YACZhhSlknJ672kSs"
        );
    }

    #[test]
    fn test_shared_secret_agrees() {
        let setup = TestSetup::default();
        let ua_private = SecretKey::from_base64url(TestSetup::UA_PRIVATE).unwrap();
        assert_eq!(ua_private.public_key(), setup.subscription.keys.p256dh);

        let receiver = RustCrypto
            .shared_secret(&ua_private, &setup.server_keys.public_key)
            .unwrap();
        let sender = RustCrypto
            .shared_secret(
                &setup.server_keys.private_key,
                &setup.subscription.keys.p256dh,
            )
            .unwrap();

        assert_eq!(*receiver, *sender);
    }

    #[test]
    fn test_seal_appends_tag() {
        let ct = RustCrypto.seal(&[7u8; KEY_SIZE], &[9u8; NONCE_SIZE], b"hi").unwrap();
        assert_eq!(ct.len(), 2 + TAG_SIZE);
    }

    #[test]
    fn test_signature_verifies() {
        let setup = TestSetup::default();
        let sig = RustCrypto
            .sign(&setup.vapid_keys.private_key, b"header.body")
            .unwrap();

        let verifying_key = VerifyingKey::from(&setup.vapid_keys.public_key.0);
        let sig = Signature::from_slice(&sig).unwrap();

        assert!(verifying_key.verify(b"header.body", &sig).is_ok());
        assert!(verifying_key.verify(b"header.other", &sig).is_err());
    }

    #[test]
    fn test_fresh_key_pairs() {
        let a = RustCrypto.generate_key_pair().unwrap();
        let b = RustCrypto.generate_key_pair().unwrap();

        assert_ne!(a.public_key, b.public_key);
    }
}
