//! # Web Push core library
#![deny(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! This library encrypts push messages for the Web Push protocol and assembles the HTTP requests
//! that deliver them to a push service.
//!
//! * Encryption: the payload is encrypted for the receiving user agent using an ECDH agreement
//! on P-256 and AES-128-GCM, in either the [RFC 8291 "aes128gcm"][1] coding or the legacy
//! "aesgcm" draft coding, see [`encryption`].
//!
//! * Authentication: the application server identifies itself to the push service with a
//! [VAPID][2] token, an ES256 signed JWT, see [`vapid`].
//!
//! * Request assembly: [`Pusher::get_request_details`] combines both into a transport-agnostic
//! [`RequestDescriptor`][`request::RequestDescriptor`]. Sending it is up to the caller.
//!
//! [1]: https://www.rfc-editor.org/rfc/rfc8291
//! [2]: https://www.rfc-editor.org/rfc/rfc8292
//!
//! ## Crypto providers
//!
//! All primitives are reached through the capability traits in [`crypto`]. The `rust` feature
//! (enabled by default) provides [`RustCrypto`][`crypto::rust::RustCrypto`].
//!
//! ## Examples
//!
//! ### Building a push request
//!
//! ```
//! use wp_core::keys::VapidKeys;
//! use wp_core::request::Method;
//! use wp_core::{PushOptions, Pusher, Subscription};
//! # use wp_core::error::Error;
//! # use wp_core::test::TestSetup;
//!
//! # fn main() -> Result<(), Error> {
//! # let (public_key, private_key) = (TestSetup::VAPID_PUBLIC, TestSetup::VAPID_PRIVATE);
//! // The application server identity, as generated once with `VapidKeys::generate`.
//! let vapid_keys = VapidKeys::from_base64url(public_key, private_key)?;
//!
//! // The JSON form of the browser's `PushSubscription`.
//! # let json = format!(
//! #     r#"{{"endpoint":"https://fcm.googleapis.com/fcm/send/ABC","keys":{{"p256dh":"{}","auth":"{}"}}}}"#,
//! #     TestSetup::UA_PUBLIC,
//! #     TestSetup::AUTH
//! # );
//! let subscription = Subscription::from_json(&json)?;
//!
//! let pusher = Pusher::new(PushOptions::new(vapid_keys, "mailto:admin@example.com"));
//! let request = pusher.get_request_details(&subscription, b"SECRET DATA")?;
//!
//! assert_eq!(request.url, "https://fcm.googleapis.com/wp/ABC");
//! assert_eq!(request.method, Method::Post);
//! # Ok(())
//! # }
//! ```
//!
//! An empty payload results in a `GET` request without body.
//!
//! ### Wire format
//!
//! An "aes128gcm" body consists of the following segments, followed by their length in bytes:
//!
//! ```text
//!                  HEADER (86)
//! = SALT (16) || RECORD SIZE (4) || KEY ID LEN (1) || SERVER PUBLIC KEY (65)
//!
//!                  RECORD (*)
//! = AES-128-GCM(PLAINTEXT (*) || 0x02 (1)) || TAG (16)
//! ```
//!
//! An "aesgcm" body is only the record, `AES-128-GCM(0x0000 (2) || PLAINTEXT (*)) || TAG (16)`.

pub mod base64url;
pub mod consts;
pub mod crypto;
pub mod encryption;
pub mod error;
pub mod hkdf;
pub mod hmac;
pub mod keys;
pub mod pusher;
pub mod request;
pub mod subscription;
pub mod vapid;

#[doc(inline)]
pub use encryption::ContentCoding;
#[doc(inline)]
pub use pusher::{PushOptions, Pusher};
#[doc(inline)]
pub use subscription::Subscription;

#[doc(hidden)]
pub use consts::*;


mod util;
