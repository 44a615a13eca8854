use crate::error::Error;

pub(crate) fn open_ct<T>(x: subtle::CtOption<T>) -> Option<T> {
    Option::from(x)
}

/// Seconds since the UNIX epoch.
pub(crate) fn now() -> Result<u64, Error> {
    let n = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|_e| Error::Clock)?
        .as_secs();

    Ok(n)
}

/// Check the length of raw key material and convert it into an array.
pub(crate) fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], Error> {
    bytes.try_into().map_err(|_| Error::InvalidKeyLength {
        expected: N,
        found: bytes.len(),
    })
}
