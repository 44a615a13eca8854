//! P-256 keys and their raw marshaling.
//!
//! On the wire every public key is an uncompressed SEC1 point (`0x04 ‖ X ‖ Y`, 65 bytes) and
//! every private key is a big-endian scalar (32 bytes). Inside the library they are opaque
//! handles that can only hold valid curve material.
//!
//! Serde serialization yields base64url strings for human-readable formats.

use crate::base64url::{self, deserialize_bin_or_b64url, serialize_bin_or_b64url};
use crate::consts::*;
use crate::error::Error;
use crate::util::{open_ct, to_array};
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::{EncodedPoint, FieldBytes};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

/// A P-256 public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(pub(crate) p256::PublicKey);

/// A P-256 private key.
///
/// The scalar is wiped from memory when dropped.
#[derive(Clone)]
pub struct SecretKey(pub(crate) p256::SecretKey);

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretKey {}

impl PublicKey {
    /// Import an uncompressed point.
    pub fn from_uncompressed(raw: &[u8]) -> Result<Self, Error> {
        let raw: [u8; PUBLIC_KEY_SIZE] = to_array(raw)?;
        if raw[0] != UNCOMPRESSED_POINT_TAG {
            return Err(Error::InvalidKeyFormat);
        }

        let (x, y) = raw[1..].split_at(COORDINATE_SIZE);
        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(x),
            FieldBytes::from_slice(y),
            false,
        );

        open_ct(p256::PublicKey::from_encoded_point(&point))
            .map(Self)
            .ok_or(Error::InvalidKey)
    }

    /// Export as an uncompressed point.
    pub fn to_uncompressed(&self) -> [u8; PUBLIC_KEY_SIZE] {
        // A public key is never the identity, so the encoding always holds both coordinates.
        let point = self.0.to_encoded_point(false);
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        out.copy_from_slice(point.as_bytes());

        out
    }

    /// Import a base64url encoded uncompressed point.
    pub fn from_base64url(s: &str) -> Result<Self, Error> {
        Self::from_uncompressed(&base64url::decode(s)?)
    }

    /// Export as a base64url encoded uncompressed point.
    pub fn to_base64url(&self) -> String {
        base64url::encode(&self.to_uncompressed())
    }
}

impl SecretKey {
    /// Generate a fresh random private key.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(p256::SecretKey::random(rng))
    }

    /// Import a raw big-endian scalar.
    pub fn from_raw(raw: &[u8]) -> Result<Self, Error> {
        let raw: Zeroizing<[u8; PRIVATE_KEY_SIZE]> = Zeroizing::new(to_array(raw)?);

        p256::SecretKey::from_bytes(FieldBytes::from_slice(raw.as_slice()))
            .map(Self)
            .map_err(|_| Error::InvalidKey)
    }

    /// Export the raw big-endian scalar.
    pub fn to_raw(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        out.copy_from_slice(&self.0.to_bytes());

        out
    }

    /// Import a base64url encoded raw scalar.
    pub fn from_base64url(s: &str) -> Result<Self, Error> {
        let raw = Zeroizing::new(base64url::decode(s)?);
        Self::from_raw(&raw)
    }

    /// Export as a base64url encoded raw scalar.
    pub fn to_base64url(&self) -> String {
        base64url::encode(self.to_raw().as_slice())
    }

    /// The public key belonging to this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }
}

/// A key pair as produced by importing raw material; the private half is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    /// The public key.
    pub public_key: PublicKey,
    /// The private key, if one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<SecretKey>,
}

/// Raw key material, the inverse of [`KeyPair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyPair {
    /// The uncompressed public point.
    pub public_key: [u8; PUBLIC_KEY_SIZE],
    /// The big-endian private scalar, if any.
    pub private_key: Option<Zeroizing<[u8; PRIVATE_KEY_SIZE]>>,
}

/// Import a raw uncompressed point and, optionally, a raw scalar.
///
/// Fails with [`Error::InvalidKeyLength`] unless the point has 65 bytes and the scalar 32, and with
/// [`Error::InvalidKeyFormat`] when the point does not start with `0x04`.
pub fn point_to_key_pair(raw_public: &[u8], raw_private: Option<&[u8]>) -> Result<KeyPair, Error> {
    let public_key = PublicKey::from_uncompressed(raw_public)?;
    let private_key = raw_private.map(SecretKey::from_raw).transpose()?;

    Ok(KeyPair {
        public_key,
        private_key,
    })
}

/// Export a public key and optional private key as raw bytes.
pub fn key_pair_to_point(public_key: &PublicKey, private_key: Option<&SecretKey>) -> RawKeyPair {
    RawKeyPair {
        public_key: public_key.to_uncompressed(),
        private_key: private_key.map(SecretKey::to_raw),
    }
}

/// A complete P-256 key pair.
///
/// Serializes as `{ "publicKey": ..., "privateKey": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyPair", into = "KeyPair")]
pub struct EcKeyPair {
    /// The public key.
    pub public_key: PublicKey,
    /// The private key.
    pub private_key: SecretKey,
}

/// The ephemeral ECDH key pair of the application server.
pub type ServerKeyPair = EcKeyPair;

/// The long-lived ECDSA identity of the application server.
pub type VapidKeys = EcKeyPair;

impl EcKeyPair {
    /// Generate a fresh key pair.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let private_key = SecretKey::generate(rng);

        Self {
            public_key: private_key.public_key(),
            private_key,
        }
    }

    /// Import a raw point and scalar, which have to belong together.
    pub fn from_raw(raw_public: &[u8], raw_private: &[u8]) -> Result<Self, Error> {
        point_to_key_pair(raw_public, Some(raw_private))?.try_into()
    }

    /// Import the base64url encoding of a raw point and scalar.
    pub fn from_base64url(public_key: &str, private_key: &str) -> Result<Self, Error> {
        let raw_private = Zeroizing::new(base64url::decode(private_key)?);
        Self::from_raw(&base64url::decode(public_key)?, &raw_private)
    }

    /// Export as the base64url encoding of the raw point and scalar.
    pub fn to_base64url(&self) -> (String, String) {
        (self.public_key.to_base64url(), self.private_key.to_base64url())
    }
}

impl TryFrom<KeyPair> for EcKeyPair {
    type Error = Error;

    fn try_from(kp: KeyPair) -> Result<Self, Self::Error> {
        let private_key = kp.private_key.ok_or(Error::InvalidKeyLength {
            expected: PRIVATE_KEY_SIZE,
            found: 0,
        })?;

        if private_key.public_key() != kp.public_key {
            return Err(Error::InvalidKey);
        }

        Ok(Self {
            public_key: kp.public_key,
            private_key,
        })
    }
}

impl From<EcKeyPair> for KeyPair {
    fn from(kp: EcKeyPair) -> Self {
        Self {
            public_key: kp.public_key,
            private_key: Some(kp.private_key),
        }
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_bin_or_b64url(&self.to_uncompressed(), serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = deserialize_bin_or_b64url::<D, PUBLIC_KEY_SIZE>(deserializer)?;
        Self::from_uncompressed(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_bin_or_b64url(&*self.to_raw(), serializer)
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Zeroizing::new(deserialize_bin_or_b64url::<D, PRIVATE_KEY_SIZE>(deserializer)?);
        Self::from_raw(raw.as_slice()).map_err(serde::de::Error::custom)
    }
}
