//! URL-safe base64 without padding, the encoding of every key, salt and token segment in Web
//! Push.
//!
//! This module also implements serde serialization for fixed-size byte artifacts: human-readable
//! formats get a base64url string, binary formats get the raw bytes as a tuple.

use crate::error::Error;
use base64ct::{Base64Url, Base64UrlUnpadded, Encoding};
use core::fmt;
use serde::de::{Error as DeError, SeqAccess, Visitor};
use serde::{ser::SerializeTuple, Deserializer, Serializer};

/// Encode bytes as unpadded base64url.
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Encode the subrange `start..end` of `bytes`.
///
/// `start` defaults to the beginning and `end` to the end of the buffer.
pub fn encode_range(bytes: &[u8], start: Option<usize>, end: Option<usize>) -> Result<String, Error> {
    let start = start.unwrap_or(0);
    let end = end.unwrap_or(bytes.len());

    bytes
        .get(start..end)
        .map(encode)
        .ok_or(Error::OutOfRange {
            start,
            end,
            len: bytes.len(),
        })
}

/// Decode base64url, with or without trailing padding.
///
/// Fails on characters outside the URL-safe alphabet and on lengths that no amount of padding
/// can repair.
pub fn decode(s: &str) -> Result<Vec<u8>, Error> {
    let padding = (4 - s.len() % 4) % 4;
    if padding == 3 {
        return Err(Error::Decode);
    }

    let mut padded = String::with_capacity(s.len() + padding);
    padded.push_str(s);
    padded.extend(core::iter::repeat('=').take(padding));

    Ok(Base64Url::decode_vec(&padded)?)
}

pub(crate) fn serialize_bin_or_b64url<S, T>(val: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    if serializer.is_human_readable() {
        serializer.serialize_str(&encode(val.as_ref()))
    } else {
        let mut seq = serializer.serialize_tuple(val.as_ref().len())?;
        for b in val.as_ref() {
            seq.serialize_element(b)?;
        }
        seq.end()
    }
}

pub(crate) fn deserialize_bin_or_b64url<'de, D: Deserializer<'de>, const N: usize>(
    deserializer: D,
) -> Result<[u8; N], D::Error> {
    if deserializer.is_human_readable() {
        struct StrVisitor<const N: usize>;

        impl<'de, const N: usize> Visitor<'de> for StrVisitor<N> {
            type Value = [u8; N];

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "a base64url string encoding {N} bytes")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                let bytes = decode(v).map_err(E::custom)?;
                let len = bytes.len();

                bytes
                    .try_into()
                    .map_err(|_| E::invalid_length(len, &self))
            }
        }

        deserializer.deserialize_str(StrVisitor::<N>)
    } else {
        struct ArrayVisitor<const N: usize>;

        impl<'de, const N: usize> Visitor<'de> for ArrayVisitor<N> {
            type Value = [u8; N];

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "an array of length {N}")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut buf = [0u8; N];
                for (i, b) in buf.iter_mut().enumerate() {
                    *b = seq
                        .next_element()?
                        .ok_or_else(|| A::Error::invalid_length(i, &self))?;
                }

                Ok(buf)
            }
        }

        deserializer.deserialize_tuple(N, ArrayVisitor::<N>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg");
        assert_eq!(encode(b"fo"), "Zm8");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
    }

    #[test]
    fn test_decode_all_paddings() {
        // Zero, one and two padding characters have to be restored.
        for input in [&b"foo"[..], b"fo", b"f", b"", &[0xfb, 0xff, 0xfe, 0x00]] {
            assert_eq!(decode(&encode(input)).unwrap(), input);
        }
    }

    #[test]
    fn test_decode_accepts_padded() {
        assert_eq!(decode("Zg==").unwrap(), b"f");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
    }

    #[test]
    fn test_decode_rejects() {
        // Standard alphabet characters.
        assert!(matches!(decode("+/8"), Err(Error::Decode)));
        // Length 1 mod 4 cannot be repaired.
        assert!(matches!(decode("Zm9vY"), Err(Error::Decode)));
        assert!(matches!(decode("Zm9v!A"), Err(Error::Decode)));
    }

    #[test]
    fn test_encode_range() {
        let bytes = b"foobar";
        assert_eq!(encode_range(bytes, None, None).unwrap(), "Zm9vYmFy");
        assert_eq!(encode_range(bytes, None, Some(3)).unwrap(), "Zm9v");
        assert_eq!(encode_range(bytes, Some(3), None).unwrap(), "YmFy");
        assert!(matches!(
            encode_range(bytes, Some(4), Some(2)),
            Err(Error::OutOfRange { start: 4, end: 2, len: 6 })
        ));
        assert!(matches!(
            encode_range(bytes, None, Some(7)),
            Err(Error::OutOfRange { start: 0, end: 7, len: 6 })
        ));
    }
}
