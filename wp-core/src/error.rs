//! Web Push errors.

/// A Web Push error.
#[derive(Debug)]
pub enum Error {
    /// A key or secret had the wrong number of bytes.
    InvalidKeyLength {
        /// The expected length.
        expected: usize,
        /// The found length.
        found: usize,
    },
    /// A public key was not an uncompressed point (first byte not `0x04`).
    InvalidKeyFormat,
    /// The key material does not describe a valid P-256 point or scalar.
    InvalidKey,
    /// The input was not valid base64url.
    Decode,
    /// A byte range lies outside its buffer.
    OutOfRange {
        /// The start of the range.
        start: usize,
        /// The end of the range.
        end: usize,
        /// The length of the buffer.
        len: usize,
    },
    /// The single-block HKDF cannot produce this many bytes.
    InvalidHkdfLength(usize),
    /// The plaintext does not fit in a single record.
    PayloadTooLarge {
        /// The size of the plaintext.
        size: usize,
        /// The largest plaintext the coding accepts.
        max: usize,
    },
    /// The content coding is not supported.
    UnsupportedCoding(String),
    /// No VAPID audience was given.
    MissingAudience,
    /// No VAPID subject was given.
    MissingSubject,
    /// A URL could not be parsed.
    InvalidUrl(String),
    /// Serde JSON error.
    Json(serde_json::Error),
    /// Opaque symmetric encryption error.
    Symmetric,
    /// Opaque signing error.
    Signature,
    /// The system random number generator failed.
    Random,
    /// The system clock is set before the UNIX epoch.
    Clock,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidKeyLength { expected, found } => {
                write!(f, "invalid key length, expected: {expected}, found: {found}")
            }
            Self::InvalidKeyFormat => write!(f, "public key is not an uncompressed point"),
            Self::InvalidKey => write!(f, "invalid P-256 key material"),
            Self::Decode => write!(f, "invalid base64url"),
            Self::OutOfRange { start, end, len } => {
                write!(f, "range {start}..{end} is out of bounds for {len} bytes")
            }
            Self::InvalidHkdfLength(len) => {
                write!(f, "cannot derive {len} bytes, HKDF output is limited to 32 bytes")
            }
            Self::PayloadTooLarge { size, max } => {
                write!(f, "payload of {size} bytes exceeds the maximum of {max} bytes")
            }
            Self::UnsupportedCoding(c) => write!(f, "content coding is not supported: {c}"),
            Self::MissingAudience => write!(f, "no audience could be generated for VAPID"),
            Self::MissingSubject => write!(f, "a subject is required for VAPID"),
            Self::InvalidUrl(u) => write!(f, "invalid URL: {u}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Symmetric => write!(f, "symmetric encryption operation error"),
            Self::Signature => write!(f, "signing error"),
            Self::Random => write!(f, "random number generator failure"),
            Self::Clock => write!(f, "system clock is set before the UNIX epoch"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<base64ct::Error> for Error {
    fn from(_: base64ct::Error) -> Self {
        Self::Decode
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}
