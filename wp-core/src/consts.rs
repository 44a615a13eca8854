//! Constants used by the Web Push content codings and VAPID.

/// Size of the salt that is freshly drawn for every message.
pub const SALT_SIZE: usize = 16;

/// Size of the subscription authentication secret.
pub const AUTH_SECRET_SIZE: usize = 16;

/// Size of a single P-256 affine coordinate.
pub const COORDINATE_SIZE: usize = 32;

/// Size of an uncompressed P-256 point: the tag byte followed by both coordinates.
pub const PUBLIC_KEY_SIZE: usize = 1 + 2 * COORDINATE_SIZE;

/// Size of a raw P-256 private scalar.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Leading byte of an uncompressed SEC1 point.
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Size of the ECDH shared secret (the X coordinate of the shared point).
pub const SHARED_SECRET_SIZE: usize = 32;

/// Size of the pseudo-random key.
pub const PRK_SIZE: usize = 32;

/// Maximum output of the single-block HKDF, one SHA-256 digest.
pub const HKDF_MAX_OUTPUT: usize = 32;

// Symmetric crypto constants, both codings use AES-128-GCM.

/// Size of the content encryption key.
pub const KEY_SIZE: usize = 16;

/// Size of the nonce.
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag.
pub const TAG_SIZE: usize = 16;

/// Size of a raw ES256 signature, `r ‖ s`.
pub const SIGNATURE_SIZE: usize = 64;

/// The record size advertised in the "aes128gcm" header.
///
/// Every message is encrypted as a single record, so the plaintext plus delimiter plus tag must
/// fit in it.
pub const RECORD_SIZE: u32 = 4096;

/// The size of the record size field.
pub const RECORD_SIZE_SIZE: usize = std::mem::size_of::<u32>();

/// The size of the key identifier length field.
pub const KEY_ID_LEN_SIZE: usize = std::mem::size_of::<u8>();

/// The "aes128gcm" header contains the following bytes:
/// * Salt: 16 bytes,
/// * Record size: 4 bytes,
/// * Key identifier length: 1 byte,
/// * Key identifier (the server public key): 65 bytes,
/// * Totalling: 16 + 4 + 1 + 65 = 86 bytes.
pub const HEADER_SIZE: usize = SALT_SIZE + RECORD_SIZE_SIZE + KEY_ID_LEN_SIZE + PUBLIC_KEY_SIZE;

/// Padding delimiter that marks the last (and only) record.
pub const LAST_RECORD_DELIMITER: u8 = 0x02;

/// Number of padding length bytes the legacy "aesgcm" coding prepends.
pub const LEGACY_PADDING_SIZE: usize = 2;

/// Time-to-live in seconds used unless configured otherwise.
pub const DEFAULT_TTL: u32 = 60;

/// Validity of a VAPID token in seconds, 12 hours.
pub const VAPID_VALIDITY: u64 = 12 * 60 * 60;

/// Endpoints of Firebase Cloud Messaging start with this prefix.
pub const FCM_ENDPOINT_PREFIX: &str = "https://fcm.googleapis.com";

/// Hosts containing this domain (Mozilla autopush) answer CORS preflights.
pub const MOZILLA_PUSH_DOMAIN: &str = "mozilla.com";
