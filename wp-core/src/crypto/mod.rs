//! Cryptographic capabilities the content codings and VAPID are built from.
//!
//! Every primitive is reached through one of the traits in this module, so the key schedule and
//! record layout can be driven by deterministic implementations in tests. The default provider,
//! [`rust::RustCrypto`], is backed by [Rust Crypto](https://github.com/RustCrypto) and is enabled
//! by the `rust` feature.

use crate::consts::*;
use crate::error::Error;
use crate::keys::{EcKeyPair, PublicKey, SecretKey};
#[doc(no_inline)]
pub use zeroize::Zeroizing;

#[cfg(feature = "rust")]
pub mod rust;

/// Source of randomness for salts.
pub trait Random {
    /// Fill `buf` with cryptographically secure random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), Error>;
}

/// Elliptic curve Diffie-Hellman on P-256.
pub trait KeyAgreement {
    /// Generate a fresh ephemeral key pair.
    fn generate_key_pair(&self) -> Result<EcKeyPair, Error>;

    /// Compute the X coordinate of `private_key * peer`.
    fn shared_secret(
        &self,
        private_key: &SecretKey,
        peer: &PublicKey,
    ) -> Result<Zeroizing<[u8; SHARED_SECRET_SIZE]>, Error>;
}

/// Key derivation.
pub trait Kdf {
    /// Derive `len` bytes from `ikm`, `salt` and `info`.
    fn derive(
        &self,
        ikm: &[u8],
        salt: &[u8],
        info: &[u8],
        len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, Error>;
}

/// AES-128-GCM encryption without associated data.
pub trait Aead {
    /// Encrypt `plaintext`, returning the ciphertext with the tag appended.
    fn seal(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error>;
}

/// ECDSA P-256 with SHA-256 (ES256).
pub trait Signer {
    /// Sign `message`, returning the raw `r ‖ s` signature.
    fn sign(&self, private_key: &SecretKey, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE], Error>;
}

/// Everything needed to encrypt and authenticate a push message.
pub trait CryptoProvider: Random + KeyAgreement + Kdf + Aead + Signer {}

impl<T: Random + KeyAgreement + Kdf + Aead + Signer> CryptoProvider for T {}

/// Derive exactly `N` bytes through a [`Kdf`].
pub(crate) fn derive_array<K: Kdf + ?Sized, const N: usize>(
    kdf: &K,
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
) -> Result<Zeroizing<[u8; N]>, Error> {
    let okm = kdf.derive(ikm, salt, info, N)?;
    if okm.len() != N {
        return Err(Error::InvalidHkdfLength(okm.len()));
    }

    let mut out = Zeroizing::new([0u8; N]);
    out.copy_from_slice(&okm);

    Ok(out)
}
