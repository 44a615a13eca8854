//! HMAC-SHA256.

use crate::error::Error;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Size of an HMAC-SHA256 tag.
pub const TAG_SIZE: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Compute `HMAC-SHA256(key, message)`.
pub fn sign(key: &[u8], message: &[u8]) -> Result<[u8; TAG_SIZE], Error> {
    sign_parts(key, &[message])
}

/// Compute the tag over the concatenation of `parts` without allocating it.
pub fn sign_parts(key: &[u8], parts: &[&[u8]]) -> Result<[u8; TAG_SIZE], Error> {
    // HMAC accepts keys of any length, this only fails on a broken backend.
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| Error::Symmetric)?;
    for part in parts {
        mac.update(part);
    }

    Ok(mac.finalize().into_bytes().into())
}
