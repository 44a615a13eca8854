//! HKDF over HMAC-SHA256, restricted to a single expand block.
//!
//! Every key Web Push derives (prk, content encryption key, nonce) is at most one SHA-256 digest
//! long, so only `T(1)` is ever computed:
//!
//! ```text
//! prk = HMAC(salt, ikm)
//! T(1) = HMAC(prk, info || 0x01)
//! okm = T(1)[..len]
//! ```

use crate::consts::HKDF_MAX_OUTPUT;
use crate::error::Error;
use crate::hmac;
use zeroize::Zeroizing;

/// A single-block HKDF instance, keyed by input keying material and a salt.
#[derive(Debug, Clone, Copy)]
pub struct Hkdf<'a> {
    ikm: &'a [u8],
    salt: &'a [u8],
}

impl<'a> Hkdf<'a> {
    /// Create a new HKDF instance.
    pub fn new(ikm: &'a [u8], salt: &'a [u8]) -> Self {
        Self { ikm, salt }
    }

    /// Derive `len` bytes bound to `info`.
    ///
    /// Fails with [`Error::InvalidHkdfLength`] for `len > 32`.
    pub fn generate(&self, info: &[u8], len: usize) -> Result<Zeroizing<Vec<u8>>, Error> {
        if len > HKDF_MAX_OUTPUT {
            return Err(Error::InvalidHkdfLength(len));
        }

        let prk = Zeroizing::new(hmac::sign(self.salt, self.ikm)?);
        let t1 = Zeroizing::new(hmac::sign_parts(prk.as_slice(), &[info, &[0x01]])?);

        Ok(Zeroizing::new(t1[..len].to_vec()))
    }

    /// Derive exactly `N` bytes into an array.
    pub fn generate_array<const N: usize>(&self, info: &[u8]) -> Result<Zeroizing<[u8; N]>, Error> {
        let okm = self.generate(info, N)?;
        let mut out = Zeroizing::new([0u8; N]);
        out.copy_from_slice(&okm);

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base64url;

    #[test]
    fn test_rfc5869_case_1() {
        let ikm = [0x0b; 22];
        let salt = hex::decode("000102030405060708090a0b0c").unwrap();
        let info = hex::decode("f0f1f2f3f4f5f6f7f8f9").unwrap();

        let okm = Hkdf::new(&ikm, &salt).generate(&info, 32).unwrap();

        assert_eq!(
            hex::encode(&*okm),
            "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf"
        );
    }

    #[test]
    fn test_truncation_is_prefix() {
        let hkdf = Hkdf::new(b"input keying material", b"salt");
        let full = hkdf.generate(b"info", 32).unwrap();

        for len in [0, 1, 12, 16, 31] {
            assert_eq!(*hkdf.generate(b"info", len).unwrap(), full[..len]);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = Hkdf::new(b"ikm", b"salt").generate_array::<16>(b"info").unwrap();
        let b = Hkdf::new(b"ikm", b"salt").generate_array::<16>(b"info").unwrap();
        let c = Hkdf::new(b"ikm", b"salt").generate_array::<16>(b"other").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_length_bound() {
        assert!(matches!(
            Hkdf::new(b"ikm", b"salt").generate(b"info", 33),
            Err(Error::InvalidHkdfLength(33))
        ));
    }

    #[test]
    fn test_rfc8291_prk() {
        // The ECDH secret and auth secret from RFC 8291, appendix A.
        let ecdh = base64url::decode("kyrL1jIIOHEzg3sM2ZWRHDRB62YACZhhSlknJ672kSs").unwrap();
        let auth = base64url::decode("BTBZMqHH6r4Tts7J_aSIgg").unwrap();
        let ua = base64url::decode("BCVxsr7N_eNgVRqvHtD0zTZsEc6-VV-JvLexhqUzORcxaOzi6-AYWXvTBHm4bjyPjs7Vd8pZGH6SRpkNtoIAiw4").unwrap();
        let as_ = base64url::decode("BP4z9KsN6nGRTbVYI_c7VJSPQTBtkgcy27mlmlMoZIIgDll6e3vCYLocInmYWAmS6TlzAC8wEqKK6PBru3jl7A8").unwrap();

        let key_info = [&b"WebPush: info\0"[..], &ua, &as_].concat();
        let ikm = Hkdf::new(&ecdh, &auth).generate(&key_info, 32).unwrap();

        assert_eq!(
            base64url::encode(&ikm),
            "S4lYMb_L0FxCeq0WhDx813KgSYqU26kOyzWUdsXYyrg"
        );
    }
}
